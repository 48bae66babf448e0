//! Engine configuration
//!
//! Timing, the reserved screen numbers of the panel project and the VPs used
//! for the shared message lines. The defaults match the stock DGUS project
//! layout; firmware overrides them when the panel project differs.

use crate::screens::ScreenId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default interval between complete update passes
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 500;

/// Default time the boot screen stays up before switching to main
pub const DEFAULT_BOOT_TIMEOUT_MS: u32 = 4000;

/// Number of message lines on info, confirm and kill screens
pub const MESSAGE_LINES: usize = 4;

/// Screens the engine itself navigates to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReservedScreens {
    /// Shown from power-up until the boot timeout expires
    pub boot: ScreenId,
    /// Fallback for an empty back-stack
    pub main: ScreenId,
    /// OK/cancel confirmation dialog
    pub confirm: ScreenId,
    /// Terminal screen after a firmware halt
    pub kill: ScreenId,
    /// Pseudo screen: the panel reports it when a popup is dismissed
    pub popup: ScreenId,
}

impl Default for ReservedScreens {
    fn default() -> Self {
        Self {
            boot: ScreenId(0),
            main: ScreenId(1),
            confirm: ScreenId(240),
            kill: ScreenId(250),
            popup: ScreenId(252),
        }
    }
}

/// Screen engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Minimum time between two complete update passes
    pub update_interval_ms: u32,
    /// Boot screen duration, `None` to start on the main screen
    pub boot_timeout_ms: Option<u32>,
    /// Reserved screen numbers
    pub screens: ReservedScreens,
    /// String VPs for the four message lines
    pub message_vps: [u16; MESSAGE_LINES],
    /// String VP of the status line, if the project has one
    pub status_vp: Option<u16>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            boot_timeout_ms: Some(DEFAULT_BOOT_TIMEOUT_MS),
            screens: ReservedScreens::default(),
            message_vps: [0x1100, 0x1120, 0x1140, 0x1160],
            status_vp: Some(0x7020),
        }
    }
}
