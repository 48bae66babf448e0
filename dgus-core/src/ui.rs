//! Handler context
//!
//! [`Navigator`] owns the static tables, the navigation state and the update
//! cursor. [`Ui`] bundles it with the transport and the firmware model for
//! the duration of one call, so handlers and formatters can write to the
//! panel, navigate and touch firmware state through a single argument.

use dgus_hal::Transport;
use dgus_protocol::{FrameWriter, VarData, FRAME_OVERHEAD};

use crate::config::{EngineConfig, MESSAGE_LINES};
use crate::nav::{ScreenState, UpdateCursor};
use crate::registry::{Dispatch, Registry};
use crate::screens::{ScreenId, ScreenMap};
use crate::traits::Firmware;

/// Tables and navigation state of one panel
pub struct Navigator<M: 'static> {
    pub(crate) registry: Registry<M>,
    pub(crate) screens: ScreenMap,
    pub(crate) config: EngineConfig,
    pub(crate) state: ScreenState,
    pub(crate) cursor: UpdateCursor,
    pub(crate) confirm_action: Option<fn(&mut M)>,
}

impl<M: 'static> Navigator<M> {
    pub fn new(registry: Registry<M>, screens: ScreenMap, config: EngineConfig) -> Self {
        let initial = match config.boot_timeout_ms {
            Some(_) => config.screens.boot,
            None => config.screens.main,
        };
        Self {
            registry,
            screens,
            config,
            state: ScreenState::new(initial),
            cursor: UpdateCursor::new(),
            confirm_action: None,
        }
    }

    pub fn registry(&self) -> &Registry<M> {
        &self.registry
    }

    pub fn screens(&self) -> &ScreenMap {
        &self.screens
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn cursor(&self) -> &UpdateCursor {
        &self.cursor
    }

    pub fn confirm_action_armed(&self) -> bool {
        self.confirm_action.is_some()
    }
}

/// Everything a handler may touch during one call
pub struct Ui<'a, M: 'static> {
    pub(crate) nav: &'a mut Navigator<M>,
    pub(crate) tx: &'a mut dyn Transport,
    /// Firmware model the registry is bound to
    pub firmware: &'a mut M,
}

impl<'a, M: 'static> Ui<'a, M> {
    pub fn new(nav: &'a mut Navigator<M>, tx: &'a mut dyn Transport, firmware: &'a mut M) -> Self {
        Self { nav, tx, firmware }
    }

    /// Frame writer over the panel transport
    pub fn writer(&mut self) -> FrameWriter<'_, dyn Transport + 'a> {
        FrameWriter::new(&mut *self.tx)
    }

    pub fn navigator(&self) -> &Navigator<M> {
        &*self.nav
    }

    pub fn current_screen(&self) -> ScreenId {
        self.nav.state.current()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.nav.config
    }

    // --- Navigation ---

    /// Ask the panel to show `screen` and make it current
    ///
    /// The previous screen is pushed onto the back-stack unless `popup` is
    /// set. The update cursor restarts so the new screen is drawn in full.
    pub fn goto_screen(&mut self, screen: ScreenId, popup: bool) {
        dgus_debug!("goto screen {} popup {}", screen.0, popup);
        self.writer().request_screen(screen.0);
        self.nav.state.enter(screen, popup);
        self.nav.cursor.reset();
    }

    /// Return to the most recent history entry, or main if there is none
    pub fn pop_to_old_screen(&mut self) {
        let previous = self
            .nav
            .state
            .pop_past()
            .unwrap_or(self.nav.config.screens.main);
        self.goto_screen(previous, true);
    }

    /// The panel switched screens on its own
    ///
    /// `data` is the raw report of the screen-change VP; the target screen is
    /// its second byte. The popup pseudo screen means a dialog was dismissed:
    /// run the armed confirm action and go back.
    pub fn on_remote_screen_change(&mut self, data: &[u8]) {
        let Some(&target) = data.get(1) else {
            dgus_warn!("screen change report without target");
            return;
        };
        let target = ScreenId(u16::from(target));

        if target == self.nav.config.screens.popup {
            if let Some(action) = self.nav.confirm_action {
                action(&mut *self.firmware);
            }
            self.pop_to_old_screen();
        } else {
            self.goto_screen(target, false);
        }
    }

    /// Arm or disarm the action run when a popup is dismissed
    pub fn setup_confirm_action(&mut self, action: Option<fn(&mut M)>) {
        self.nav.confirm_action = action;
    }

    /// Show the confirm dialog with up to four message lines
    ///
    /// When the user presses OK, the inbound handler of `vp` is replayed with
    /// the OK payload.
    pub fn show_confirmation(&mut self, vp: u16, lines: [Option<&str>; MESSAGE_LINES]) {
        let confirm = self.nav.config.screens.confirm;
        if self.nav.state.current() == confirm {
            self.pop_to_old_screen();
        }
        self.nav.state.set_confirm_vp(Some(vp));
        self.send_info_screen(lines);
        self.goto_screen(confirm, false);
    }

    /// OK was pressed on the confirm dialog
    pub fn confirmed_ok(&mut self, data: &[u8]) {
        let Some(vp) = self.nav.state.confirm_vp() else {
            dgus_debug!("confirm without a pending VP");
            return;
        };
        let Some(var) = self.nav.registry.lookup(vp) else {
            dgus_warn!("confirm VP {} not registered", vp);
            return;
        };
        match var.rx {
            Some(handler) => handler(self, var, data),
            None => dgus_warn!("confirm VP {} has no handler", vp),
        }
    }

    // --- Messages ---

    /// Fill the four message lines; `None` clears a line
    pub fn send_info_screen(&mut self, lines: [Option<&str>; MESSAGE_LINES]) {
        let vps = self.nav.config.message_vps;
        for (vp, line) in vps.into_iter().zip(lines) {
            self.send_text(vp, line.unwrap_or(""));
        }
    }

    /// Show `message` on the status line
    pub fn set_status_message(&mut self, message: &str) {
        match self.nav.config.status_vp {
            Some(vp) => self.send_text(vp, message),
            None => dgus_debug!("no status line configured"),
        }
    }

    fn send_text(&mut self, vp: u16, text: &str) {
        match self.nav.registry.lookup(vp) {
            Some(var) => self.writer().write_str(vp, text, var.size),
            None => dgus_debug!("text VP {} not registered", vp),
        }
    }

    // --- Dispatch ---

    /// Route a variable-changed report to its handler
    pub fn dispatch_report(&mut self, report: &VarData) -> Dispatch {
        if let Some(var) = self.nav.registry.lookup(report.vp) {
            let declared = report.declared_len();
            let size = usize::from(var.size);
            if declared != size && !(size == 1 && declared == 2) {
                dgus_debug!(
                    "VP {} reported {} bytes, registered {}",
                    report.vp,
                    declared,
                    size
                );
            }
        }
        self.dispatch_inbound(report.vp, report.data())
    }

    /// Invoke the inbound handler of `vp` with `data`
    pub fn dispatch_inbound(&mut self, vp: u16, data: &[u8]) -> Dispatch {
        let Some(var) = self.nav.registry.lookup(vp) else {
            dgus_debug!("inbound VP {} not registered", vp);
            return Dispatch::Unknown;
        };
        let Some(handler) = var.rx else {
            dgus_debug!("inbound VP {} is read-only", vp);
            return Dispatch::ReadOnly;
        };
        if data.len() < var.min_rx_len() {
            dgus_warn!("inbound VP {} carries {} bytes", vp, data.len());
            return Dispatch::TooShort;
        }
        handler(self, var, data);
        Dispatch::Handled
    }

    /// Render `vp` now through its formatter
    ///
    /// Returns `false` if the VP is unknown or has no formatter.
    pub fn dispatch_outbound(&mut self, vp: u16) -> bool {
        match self.nav.registry.lookup(vp) {
            Some(var) => match var.tx {
                Some(formatter) => {
                    formatter(self, var);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    // --- Updater ---

    /// Restart the current screen's update pass from the top
    pub fn force_complete_update(&mut self) {
        self.nav.cursor.force_complete_update();
    }

    /// Leave `vp` out of the next update pass
    ///
    /// Used after the firmware adjusted a value the user just entered, so the
    /// stale value is not echoed back before the new one lands.
    pub fn skip_next_update(&mut self, vp: u16) {
        self.nav.cursor.skip_next(vp);
    }

    /// Send as many of the current screen's VPs as fit into the transmit queue
    ///
    /// At least one VP is sent per call. Returns `true` once the end of the
    /// list has been reached. Calling it again on a complete screen starts a
    /// new pass from the top; pacing full refreshes is up to the caller
    /// (see [`ScreenEngine::tick`](crate::ScreenEngine::tick)).
    pub fn update_vps(&mut self) -> bool {
        let screen = self.nav.state.current();
        let Some(list) = self.nav.screens.find(screen) else {
            dgus_trace!("screen {} has no VP list", screen.0);
            self.nav.cursor.finish();
            return true;
        };

        let mut sent = false;
        loop {
            let vp = ScreenMap::vp_at(list, self.nav.cursor.position());
            if vp == 0 {
                self.nav.cursor.finish();
                return true;
            }

            if !self.nav.cursor.take_skip(vp) {
                match self.nav.registry.lookup(vp) {
                    Some(var) => {
                        if let Some(formatter) = var.tx {
                            let needed = FRAME_OVERHEAD + usize::from(var.size);
                            if sent && needed > self.tx.free_send_buffer() {
                                dgus_trace!("tx queue full at VP {}", vp);
                                self.nav.cursor.defer();
                                return false;
                            }
                            formatter(self, var);
                            sent = true;
                            if self.nav.state.current() != screen {
                                // The formatter navigated; the new screen starts fresh
                                return false;
                            }
                        }
                    }
                    None => dgus_debug!("screen {} lists unknown VP {}", screen.0, vp),
                }
            }
            self.nav.cursor.advance();
        }
    }
}

impl<'a, M: Firmware + 'static> Ui<'a, M> {
    /// Ask the user to acknowledge `message`, or withdraw a pending request
    ///
    /// Acknowledging calls [`Firmware::user_confirmed`].
    pub fn user_confirm_required(&mut self, message: Option<&str>) {
        let popup = self.nav.config.screens.popup;
        match message {
            Some(message) => {
                self.send_info_screen([Some("Please confirm."), None, Some(message), None]);
                self.setup_confirm_action(Some(M::user_confirmed));
                self.goto_screen(popup, false);
            }
            None => {
                if self.nav.state.current() == popup {
                    self.setup_confirm_action(None);
                    self.pop_to_old_screen();
                }
            }
        }
    }

    /// The firmware halted; show why on the kill screen
    pub fn printer_killed(&mut self, error: &str, component: &str) {
        self.send_info_screen([
            Some("Printer halted"),
            Some(error),
            Some(component),
            Some("Please reset"),
        ]);
        let kill = self.nav.config.screens.kill;
        self.goto_screen(kill, false);
    }
}
