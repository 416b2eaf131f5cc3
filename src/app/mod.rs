//! App - Console Front-End
//!
//! Navigation, command handling and the ratatui dashboard around the state
//! layer.

pub mod actions;
pub mod console;
pub mod entities;
pub mod input;
pub mod navigation;
