//! Utility modules

pub mod datetime;
