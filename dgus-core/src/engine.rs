//! Screen engine
//!
//! Drives one panel from the firmware main loop. Each [`ScreenEngine::tick`]
//! drains the receive side, dispatching every complete report to its
//! handler, then sends the next slice of the current screen's VPs. Firmware
//! events (navigation, confirm requests, halts) go through [`ScreenEngine::ui`].

use dgus_hal::Transport;
use dgus_protocol::{Datagram, FrameParser};

use crate::config::EngineConfig;
use crate::guard::RxGuard;
use crate::nav::{ScreenState, UpdateCursor};
use crate::registry::{Dispatch, Registry};
use crate::screens::{ScreenId, ScreenMap};
use crate::ui::{Navigator, Ui};

/// Panel driver state
pub struct ScreenEngine<M: 'static> {
    nav: Navigator<M>,
    parser: FrameParser,
    rx_guard: Option<&'static RxGuard>,
    display_seen: bool,
    next_update_ms: u64,
    boot_deadline_ms: Option<u64>,
}

impl<M: 'static> ScreenEngine<M> {
    pub fn new(registry: Registry<M>, screens: ScreenMap, config: EngineConfig) -> Self {
        Self {
            nav: Navigator::new(registry, screens, config),
            parser: FrameParser::new(),
            rx_guard: None,
            display_seen: false,
            next_update_ms: 0,
            boot_deadline_ms: None,
        }
    }

    /// Share a receive guard with code that can run while a handler is active
    ///
    /// Firmware whose idle hook may call [`process_rx`](Self::process_rx)
    /// from inside a handler keeps one `static` [`RxGuard`] and checks it
    /// before reaching for the engine. Without a shared guard the engine's
    /// `&mut self` borrow already excludes nested calls.
    pub fn with_rx_guard(mut self, guard: &'static RxGuard) -> Self {
        self.rx_guard = Some(guard);
        self
    }

    /// Show the initial screen and draw it
    ///
    /// The boot screen is shown when a boot timeout is configured, the main
    /// screen otherwise.
    pub fn init<T: Transport>(&mut self, tx: &mut T, firmware: &mut M, now_ms: u64) {
        let config = &self.nav.config;
        let initial = match config.boot_timeout_ms {
            Some(_) => config.screens.boot,
            None => config.screens.main,
        };
        self.boot_deadline_ms = config
            .boot_timeout_ms
            .map(|timeout| now_ms + u64::from(timeout));
        self.next_update_ms = now_ms + u64::from(config.update_interval_ms);

        dgus_debug!("init on screen {}", initial.0);
        let mut ui = self.ui(tx, firmware);
        ui.goto_screen(initial, true);
        ui.update_vps();
    }

    /// Handler context for firmware-initiated actions
    pub fn ui<'a, T: Transport>(&'a mut self, tx: &'a mut T, firmware: &'a mut M) -> Ui<'a, M> {
        Ui::new(&mut self.nav, tx, firmware)
    }

    /// Parse everything received so far and dispatch each report
    ///
    /// Does nothing while the shared receive guard is held.
    pub fn process_rx<T: Transport>(&mut self, tx: &mut T, firmware: &mut M) {
        let _token = match self.rx_guard {
            Some(guard) => match guard.try_enter() {
                Some(token) => Some(token),
                None => {
                    dgus_trace!("receive processing already running");
                    return;
                }
            },
            None => None,
        };

        loop {
            match self.parser.poll(&mut *tx) {
                Ok(Some(datagram)) => {
                    self.display_seen = true;
                    match datagram {
                        Datagram::WriteAck => dgus_trace!("write acknowledged"),
                        Datagram::VarChanged(report) => {
                            let mut ui = Ui::new(&mut self.nav, &mut *tx, &mut *firmware);
                            let outcome = ui.dispatch_report(&report);
                            if outcome != Dispatch::Handled {
                                dgus_trace!("VP {} not handled: {:?}", report.vp, outcome);
                            }
                        }
                        Datagram::Other { command } => {
                            dgus_debug!("ignoring command {}", command);
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => dgus_warn!("receive error: {:?}", e),
            }
        }
    }

    /// Send the next slice of the current screen; `true` once complete
    ///
    /// Not rate limited: a complete screen is sent again in full.
    pub fn update_vps<T: Transport>(&mut self, tx: &mut T, firmware: &mut M) -> bool {
        self.ui(tx, firmware).update_vps()
    }

    /// One main-loop iteration
    ///
    /// Processes input, continues an incomplete update pass or starts a new
    /// one once the update interval has elapsed, and leaves the boot screen
    /// when its timeout expires. The kill screen is never refreshed. Returns
    /// whether the current pass is complete.
    pub fn tick<T: Transport>(&mut self, now_ms: u64, tx: &mut T, firmware: &mut M) -> bool {
        self.process_rx(tx, firmware);

        if self.nav.state.current() == self.nav.config.screens.kill {
            return true;
        }

        if let Some(deadline) = self.boot_deadline_ms {
            if now_ms >= deadline {
                self.boot_deadline_ms = None;
                let screens = self.nav.config.screens;
                if self.nav.state.current() == screens.boot {
                    self.ui(tx, firmware).goto_screen(screens.main, true);
                }
            }
        }

        if !self.nav.cursor.is_complete() || now_ms >= self.next_update_ms {
            self.next_update_ms = now_ms + u64::from(self.nav.config.update_interval_ms);
            return self.update_vps(tx, firmware);
        }
        true
    }

    /// Whether at least one valid frame has been received
    pub fn display_seen(&self) -> bool {
        self.display_seen
    }

    pub fn current_screen(&self) -> ScreenId {
        self.nav.state.current()
    }

    pub fn is_complete(&self) -> bool {
        self.nav.cursor.is_complete()
    }

    pub fn state(&self) -> &ScreenState {
        &self.nav.state
    }

    pub fn cursor(&self) -> &UpdateCursor {
        &self.nav.cursor
    }

    pub fn navigator(&self) -> &Navigator<M> {
        &self.nav
    }

    pub fn parser(&self) -> &FrameParser {
        &self.parser
    }

    pub fn rx_guard(&self) -> Option<&'static RxGuard> {
        self.rx_guard
    }
}
