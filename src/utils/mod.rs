//! Utility Module
//!
//! - [`time`]: frame clock for fixed-step and real-time loops

pub mod time;

pub use time::{ClockMode, Timer};
