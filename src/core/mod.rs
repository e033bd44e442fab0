//! Core types and constants for the position fix solver

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
