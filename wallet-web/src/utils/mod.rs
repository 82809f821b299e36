//! Utilities

pub mod constants;
pub mod format;
