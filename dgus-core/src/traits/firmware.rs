//! Firmware services used by the standard handlers and formatters

use core::fmt;

/// Heater index of the heated bed
pub const BED_HEATER: u8 = u8::MAX;

/// The command queue has no free slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command queue full")
    }
}

/// Trait for the machine side of the panel
///
/// Implemented by the firmware model that the registry is bound to. The
/// handlers never block: a rejected command is logged and dropped, and the
/// user can press the button again.
pub trait Firmware {
    /// Queue a G-code line for execution
    fn enqueue(&mut self, command: &str) -> Result<(), QueueFull>;

    /// Whether a print job is running
    fn is_printing(&self) -> bool;

    /// Set the target of `heater` (`BED_HEATER` for the bed)
    ///
    /// Returns the target actually applied, which may be clamped.
    fn set_target_temperature(&mut self, heater: u8, celsius: u16) -> u16;

    fn disable_all_heaters(&mut self);

    /// Whether `axis` is homed or otherwise safe to jog
    fn can_move(&self, axis: char) -> bool {
        let _ = axis;
        true
    }

    /// Whether positioning is currently relative (`G91`)
    fn relative_mode(&self) -> bool;

    /// Current feedrate in mm/min
    fn feedrate_mm_min(&self) -> u16;

    /// Seconds since the print job started
    fn elapsed_print_secs(&self) -> u32 {
        0
    }

    /// Job progress, 0 to 100
    fn progress_percent(&self) -> u8 {
        0
    }

    /// The user acknowledged a confirm request
    fn user_confirmed(&mut self) {}
}
