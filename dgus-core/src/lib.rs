//! Screen synchronisation engine for DGUS touchscreen panels
//!
//! This crate keeps the fields of the page shown on a DGUS panel in sync with
//! firmware state and routes touch events back into firmware actions:
//!
//! - [`registry`]: static table of display variables (VPs) with their bound
//!   firmware value, inbound handler and outbound formatter
//! - [`screens`]: which VPs each screen shows
//! - [`nav`]: current screen, bounded back-stack and the update cursor
//! - [`engine`]: the cooperative engine driven once per main-loop iteration
//! - [`formatters`] / [`handlers`]: the standard outbound encoders and a set
//!   of representative touch handlers
//!
//! Everything runs on one thread of control. Nothing blocks: writes are
//! queued into the transport and the updater stops early when the transmit
//! queue is estimated to be full, resuming on the next tick.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;

pub mod config;
pub mod engine;
pub mod formatters;
pub mod guard;
pub mod handlers;
pub mod nav;
pub mod registry;
pub mod screens;
pub mod traits;
pub mod ui;

pub use config::{EngineConfig, ReservedScreens};
pub use engine::ScreenEngine;
pub use guard::RxGuard;
pub use nav::{BackStack, ScreenState, UpdateCursor, NUM_PAST_SCREENS};
pub use registry::{Dispatch, Registry, RegistryError, Var, VpVar};
pub use screens::{ScreenEntry, ScreenId, ScreenMap};
pub use traits::{Firmware, QueueFull, BED_HEATER};
pub use ui::Ui;
