//! Theme - Console Colors and Status Presentation

pub mod colors;
