//! SCADA Console Library
//!
//! This crate provides the application logic for a simulated supervisory
//! control console: a variable tree whose good-quality points follow a
//! random walk, and the panels that present it.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod state;
pub mod theme;
pub mod utils;
