//! Navigation state
//!
//! The screen currently shown, a bounded history for "back" navigation and
//! the cursor of the incremental updater.

use heapless::Deque;

use crate::screens::ScreenId;

/// Depth of the back-stack
pub const NUM_PAST_SCREENS: usize = 4;

/// Bounded most-recent-first screen history
///
/// Pushing onto a full stack drops the oldest entry.
#[derive(Debug, Clone)]
pub struct BackStack {
    screens: Deque<ScreenId, NUM_PAST_SCREENS>,
}

impl BackStack {
    pub const fn new() -> Self {
        Self {
            screens: Deque::new(),
        }
    }

    pub fn push(&mut self, screen: ScreenId) {
        if self.screens.is_full() {
            self.screens.pop_back();
        }
        // Cannot fail, a slot was freed above
        let _ = self.screens.push_front(screen);
    }

    pub fn pop(&mut self) -> Option<ScreenId> {
        self.screens.pop_front()
    }

    pub fn peek(&self) -> Option<ScreenId> {
        self.screens.front().copied()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn clear(&mut self) {
        self.screens.clear();
    }

    /// Most recent first
    pub fn iter(&self) -> impl Iterator<Item = ScreenId> + '_ {
        self.screens.iter().copied()
    }
}

impl Default for BackStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Which screen is shown and how we got there
#[derive(Debug, Clone)]
pub struct ScreenState {
    current: ScreenId,
    past: BackStack,
    confirm_vp: Option<u16>,
    popup: bool,
}

impl ScreenState {
    pub const fn new(initial: ScreenId) -> Self {
        Self {
            current: initial,
            past: BackStack::new(),
            confirm_vp: None,
            popup: false,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn past(&self) -> &BackStack {
        &self.past
    }

    /// VP whose handler runs when the confirm dialog is acknowledged
    pub fn confirm_vp(&self) -> Option<u16> {
        self.confirm_vp
    }

    pub fn set_confirm_vp(&mut self, vp: Option<u16>) {
        self.confirm_vp = vp;
    }

    /// Whether the current screen was entered without recording history
    pub fn is_popup(&self) -> bool {
        self.popup
    }

    /// Make `screen` current; the previous one is remembered unless `popup`
    pub fn enter(&mut self, screen: ScreenId, popup: bool) {
        if !popup {
            self.past.push(self.current);
        }
        self.current = screen;
        self.popup = popup;
    }

    /// Remove and return the most recent history entry
    pub fn pop_past(&mut self) -> Option<ScreenId> {
        self.past.pop()
    }
}

/// Position of the incremental updater within the current screen's VP list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdateCursor {
    update_ptr: usize,
    skip_vp: Option<u16>,
    complete: bool,
}

impl UpdateCursor {
    pub const fn new() -> Self {
        Self {
            update_ptr: 0,
            skip_vp: None,
            complete: false,
        }
    }

    pub fn position(&self) -> usize {
        self.update_ptr
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn skip_vp(&self) -> Option<u16> {
        self.skip_vp
    }

    /// Restart from the top of the list on the next pass
    pub fn force_complete_update(&mut self) {
        self.update_ptr = 0;
        self.complete = false;
    }

    /// Fresh cursor for a newly entered screen
    pub fn reset(&mut self) {
        self.force_complete_update();
        self.skip_vp = None;
    }

    /// Leave `vp` out of the next update pass only
    pub fn skip_next(&mut self, vp: u16) {
        self.skip_vp = Some(vp);
    }

    /// Consume the one-shot skip if it names `vp`
    pub(crate) fn take_skip(&mut self, vp: u16) -> bool {
        if self.skip_vp == Some(vp) {
            self.skip_vp = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) {
        self.update_ptr += 1;
    }

    pub(crate) fn finish(&mut self) {
        self.update_ptr = 0;
        self.complete = true;
    }

    pub(crate) fn defer(&mut self) {
        self.complete = false;
    }
}
