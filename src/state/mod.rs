//! State - Console State Modules
//!
//! Each state module represents a distinct piece of application state.
//! Only the variable store is shared with background work; the rest is
//! owned by the console loop.

pub mod connection_state;
pub mod log_state;
pub mod navigation_state;
pub mod project_state;
pub mod variables_state;
