//! Screen to VP mapping
//!
//! Each screen of the panel project lists the VPs it shows. The list ends at
//! a `0` entry or at the end of the slice, whichever comes first.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen number as used by the panel project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenId(pub u16);

impl From<u16> for ScreenId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// VP list of one screen
#[derive(Debug, Clone, Copy)]
pub struct ScreenEntry {
    pub screen: ScreenId,
    pub vps: &'static [u16],
}

impl ScreenEntry {
    pub const fn new(screen: u16, vps: &'static [u16]) -> Self {
        Self {
            screen: ScreenId(screen),
            vps,
        }
    }
}

/// Static screen table
#[derive(Debug, Clone, Copy)]
pub struct ScreenMap {
    entries: &'static [ScreenEntry],
}

impl ScreenMap {
    pub const fn new(entries: &'static [ScreenEntry]) -> Self {
        Self { entries }
    }

    /// VP list of `screen`, `None` if the screen has no entry
    pub fn find(&self, screen: ScreenId) -> Option<&'static [u16]> {
        self.entries
            .iter()
            .find(|entry| entry.screen == screen)
            .map(|entry| entry.vps)
    }

    /// VP at `index` of a screen list; the sentinel and the end both read as `0`
    pub fn vp_at(list: &[u16], index: usize) -> u16 {
        list.get(index).copied().unwrap_or(0)
    }

    pub fn entries(&self) -> &'static [ScreenEntry] {
        self.entries
    }
}
