//! Domain - Pure Data Structures
//!
//! These types don't depend on the runtime or the console and represent the
//! supervised plant.

pub mod config;
pub mod project;
pub mod projection;
pub mod protocol;
pub mod variable;
