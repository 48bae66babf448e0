//! Firmware abstraction traits
//!
//! These traits define the interface between the screen engine and the
//! machine firmware it drives.

pub mod firmware;

pub use firmware::{Firmware, QueueFull, BED_HEATER};
