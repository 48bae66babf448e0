//! Shared printer model and panel tables for the integration tests

#![allow(dead_code)]

use dgus_core::formatters::{fixed, percentage, print_progress, print_time, string, word};
use dgus_core::handlers::{
    all_heaters_off, confirmed_ok, fan_toggle, heater_toggle, home_all, manual_move, motor_lock,
    percentage_to_u8, screen_change, screen_change_if_idle, set_fixed, set_word, settings,
    temperature_changed,
};
use dgus_core::{
    EngineConfig, Firmware, QueueFull, Registry, RxGuard, ScreenEngine, ScreenEntry, ScreenMap, Ui,
    Var, VpVar, BED_HEATER,
};
use dgus_hal::MockTransport;

pub const VP_SCREEN_CHANGE: u16 = 0x0084;
pub const VP_ECHO: u16 = 0x000A;
pub const VP_FLOW: u16 = 0x1000;
pub const VP_A: u16 = 0x2010;
pub const VP_B: u16 = 0x2020;
pub const VP_C: u16 = 0x2030;
pub const VP_HOTEND: u16 = 0x3000;
pub const VP_BED: u16 = 0x3002;
pub const VP_HEATERS_OFF: u16 = 0x3004;
pub const VP_FAN: u16 = 0x3010;
pub const VP_FAN_TOGGLE: u16 = 0x3012;
pub const VP_BED_TOGGLE: u16 = 0x3014;
pub const VP_Z_OFFSET: u16 = 0x3020;
pub const VP_FLOW_SET: u16 = 0x3022;
pub const VP_MOVE_X: u16 = 0x4000;
pub const VP_MOVE_Z: u16 = 0x4002;
pub const VP_HOME_ALL: u16 = 0x4004;
pub const VP_MOTOR_LOCK: u16 = 0x4006;
pub const VP_SETTINGS: u16 = 0x4008;
pub const VP_CONFIRM_OK: u16 = 0x5000;
pub const VP_SCREEN_IF_IDLE: u16 = 0x5002;
pub const VP_DANGEROUS: u16 = 0x5004;
pub const VP_MSG1: u16 = 0x1100;
pub const VP_MSG2: u16 = 0x1120;
pub const VP_MSG3: u16 = 0x1140;
pub const VP_MSG4: u16 = 0x1160;
pub const VP_STATUS: u16 = 0x7020;
pub const VP_READ_ONLY: u16 = 0x6000;
pub const VP_NO_FORMATTER: u16 = 0x6002;
pub const VP_PRINT_TIME: u16 = 0x6004;
pub const VP_PROGRESS: u16 = 0x6006;
pub const VP_NAME: u16 = 0x6010;

pub const MSG_LEN: u8 = 20;
pub const STATUS_LEN: u8 = 32;

pub const SCREEN_MAIN: u16 = 1;
pub const SCREEN_UPDATER: u16 = 5;
pub const SCREEN_GAP: u16 = 6;
pub const SCREEN_UNKNOWN_VP: u16 = 7;
pub const SCREEN_TEMPS: u16 = 8;

/// Receive guard shared between the engine and the "idle hook" in tests
pub static RX_GUARD: RxGuard = RxGuard::new();

/// Firmware stand-in recording everything the panel asked for
#[derive(Debug)]
pub struct Printer {
    pub commands: Vec<String>,
    pub queue_capacity: usize,
    pub printing: bool,
    pub max_hotend: u16,
    pub hotend_target: u16,
    pub bed_target: u16,
    pub heaters_disabled: bool,
    pub relative: bool,
    pub feedrate: u16,
    pub homed: bool,
    pub confirmations: u32,
    pub fan: u8,
    pub flow: u16,
    pub z_offset: f32,
    pub bed_heater: i16,
    pub a: u16,
    pub b: u16,
    pub c: u16,
    pub name: String,
    pub elapsed: u32,
    pub progress: u8,
    pub received: Vec<(u16, Vec<u8>)>,
    pub rx_guard_held: Vec<bool>,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            queue_capacity: usize::MAX,
            printing: false,
            max_hotend: 275,
            hotend_target: 0,
            bed_target: 0,
            heaters_disabled: false,
            relative: false,
            feedrate: 3000,
            homed: true,
            confirmations: 0,
            fan: 0,
            flow: 100,
            z_offset: 0.0,
            bed_heater: 0,
            a: 1,
            b: 2,
            c: 3,
            name: String::from("printer"),
            elapsed: 0,
            progress: 0,
            received: Vec::new(),
            rx_guard_held: Vec::new(),
        }
    }
}

impl Firmware for Printer {
    fn enqueue(&mut self, command: &str) -> Result<(), QueueFull> {
        if self.commands.len() >= self.queue_capacity {
            return Err(QueueFull);
        }
        self.commands.push(command.to_string());
        Ok(())
    }

    fn is_printing(&self) -> bool {
        self.printing
    }

    fn set_target_temperature(&mut self, heater: u8, celsius: u16) -> u16 {
        if heater == BED_HEATER {
            self.bed_target = celsius;
            celsius
        } else {
            self.hotend_target = celsius.min(self.max_hotend);
            self.hotend_target
        }
    }

    fn disable_all_heaters(&mut self) {
        self.heaters_disabled = true;
        self.hotend_target = 0;
        self.bed_target = 0;
    }

    fn can_move(&self, _axis: char) -> bool {
        self.homed
    }

    fn relative_mode(&self) -> bool {
        self.relative
    }

    fn feedrate_mm_min(&self) -> u16 {
        self.feedrate
    }

    fn elapsed_print_secs(&self) -> u32 {
        self.elapsed
    }

    fn progress_percent(&self) -> u8 {
        self.progress
    }

    fn user_confirmed(&mut self) {
        self.confirmations += 1;
    }
}

fn record(ui: &mut Ui<'_, Printer>, var: &VpVar<Printer>, data: &[u8]) {
    ui.firmware.received.push((var.vp, data.to_vec()));
    ui.firmware.rx_guard_held.push(RX_GUARD.is_busy());
}

fn hotend(p: &mut Printer) -> &mut u16 {
    &mut p.hotend_target
}
fn bed(p: &mut Printer) -> &mut u16 {
    &mut p.bed_target
}
fn fan(p: &mut Printer) -> &mut u8 {
    &mut p.fan
}
fn flow(p: &mut Printer) -> &mut u16 {
    &mut p.flow
}
fn z_offset(p: &mut Printer) -> &mut f32 {
    &mut p.z_offset
}
fn bed_heater(p: &mut Printer) -> &mut i16 {
    &mut p.bed_heater
}
fn a(p: &mut Printer) -> &mut u16 {
    &mut p.a
}
fn b(p: &mut Printer) -> &mut u16 {
    &mut p.b
}
fn c(p: &mut Printer) -> &mut u16 {
    &mut p.c
}
fn name(p: &Printer) -> &str {
    &p.name
}

pub static VARS: [VpVar<Printer>; 33] = [
    VpVar::new(VP_SCREEN_CHANGE, 4, None, Some(screen_change), None),
    VpVar::new(VP_ECHO, 2, None, Some(record), None),
    VpVar::new(VP_FLOW, 2, Some(Var::U16(flow)), Some(record), Some(word)),
    VpVar::new(VP_A, 2, Some(Var::U16(a)), None, Some(word)),
    VpVar::new(VP_B, 2, Some(Var::U16(b)), None, Some(word)),
    VpVar::new(VP_C, 2, Some(Var::U16(c)), None, Some(word)),
    VpVar::new(
        VP_HOTEND,
        2,
        Some(Var::U16(hotend)),
        Some(temperature_changed::<Printer, 0>),
        Some(word),
    ),
    VpVar::new(
        VP_BED,
        2,
        Some(Var::U16(bed)),
        Some(temperature_changed::<Printer, BED_HEATER>),
        Some(word),
    ),
    VpVar::new(VP_HEATERS_OFF, 2, None, Some(all_heaters_off), None),
    VpVar::new(
        VP_FAN,
        1,
        Some(Var::U8(fan)),
        Some(percentage_to_u8),
        Some(percentage),
    ),
    VpVar::new(VP_FAN_TOGGLE, 1, Some(Var::U8(fan)), Some(fan_toggle), None),
    VpVar::new(
        VP_BED_TOGGLE,
        2,
        Some(Var::I16(bed_heater)),
        Some(heater_toggle::<Printer, 60>),
        None,
    ),
    VpVar::new(
        VP_Z_OFFSET,
        2,
        Some(Var::F32(z_offset)),
        Some(set_fixed::<Printer, 2>),
        Some(fixed::<Printer, 2>),
    ),
    VpVar::new(VP_FLOW_SET, 2, Some(Var::U16(flow)), Some(set_word), None),
    VpVar::new(VP_MOVE_X, 2, None, Some(manual_move::<Printer, 'X'>), None),
    VpVar::new(VP_MOVE_Z, 2, None, Some(manual_move::<Printer, 'Z'>), None),
    VpVar::new(VP_HOME_ALL, 2, None, Some(home_all), None),
    VpVar::new(VP_MOTOR_LOCK, 2, None, Some(motor_lock), None),
    VpVar::new(VP_SETTINGS, 2, None, Some(settings), None),
    VpVar::new(VP_CONFIRM_OK, 2, None, Some(confirmed_ok), None),
    VpVar::new(VP_SCREEN_IF_IDLE, 4, None, Some(screen_change_if_idle), None),
    VpVar::new(VP_DANGEROUS, 2, None, Some(record), None),
    VpVar::new(VP_MSG1, MSG_LEN, None, None, None),
    VpVar::new(VP_MSG2, MSG_LEN, None, None, None),
    VpVar::new(VP_MSG3, MSG_LEN, None, None, None),
    VpVar::new(VP_MSG4, MSG_LEN, None, None, None),
    VpVar::new(VP_STATUS, STATUS_LEN, None, None, None),
    VpVar::new(VP_READ_ONLY, 2, Some(Var::U16(a)), None, Some(word)),
    VpVar::new(VP_NO_FORMATTER, 2, Some(Var::U16(b)), None, None),
    VpVar::new(VP_PRINT_TIME, 12, None, None, Some(print_time)),
    VpVar::new(VP_PROGRESS, 2, None, None, Some(print_progress)),
    VpVar::new(VP_NAME, 8, Some(Var::Text(name)), None, Some(string)),
    VpVar::end(),
];

static MAIN_VPS: [u16; 2] = [VP_FLOW, 0];
static UPDATER_VPS: [u16; 4] = [VP_A, VP_B, VP_C, 0];
static GAP_VPS: [u16; 4] = [VP_A, VP_NO_FORMATTER, VP_B, 0];
static UNKNOWN_VPS: [u16; 2] = [0x7777, VP_A];
static TEMP_VPS: [u16; 3] = [VP_HOTEND, VP_BED, 0];
static KILL_VPS: [u16; 2] = [VP_FLOW, 0];

pub static SCREENS: [ScreenEntry; 6] = [
    ScreenEntry::new(SCREEN_MAIN, &MAIN_VPS),
    ScreenEntry::new(SCREEN_UPDATER, &UPDATER_VPS),
    ScreenEntry::new(SCREEN_GAP, &GAP_VPS),
    ScreenEntry::new(SCREEN_UNKNOWN_VP, &UNKNOWN_VPS),
    ScreenEntry::new(SCREEN_TEMPS, &TEMP_VPS),
    ScreenEntry::new(250, &KILL_VPS),
];

/// Engine starting on the main screen, without a boot screen
pub fn engine() -> ScreenEngine<Printer> {
    engine_with(EngineConfig {
        boot_timeout_ms: None,
        ..EngineConfig::default()
    })
}

pub fn engine_with(config: EngineConfig) -> ScreenEngine<Printer> {
    ScreenEngine::new(Registry::new(&VARS), ScreenMap::new(&SCREENS), config)
}

/// Encode a variable-changed report as the panel sends it
pub fn report(vp: u16, words: u8, data: &[u8]) -> Vec<u8> {
    let [hi, lo] = vp.to_be_bytes();
    let mut frame = vec![0x5A, 0xA5, (4 + data.len()) as u8, 0x83, hi, lo, words];
    frame.extend_from_slice(data);
    frame
}

/// Frames decoded from captured output: (command, vp, data)
pub fn frames(bytes: &[u8]) -> Vec<(u8, u16, Vec<u8>)> {
    let mut out = Vec::new();
    let mut rest = bytes;
    while rest.len() >= 6 {
        assert_eq!(&rest[..2], &[0x5A, 0xA5], "frame header");
        let len = usize::from(rest[2]);
        let command = rest[3];
        let vp = u16::from_be_bytes([rest[4], rest[5]]);
        let data = rest[6..3 + len].to_vec();
        out.push((command, vp, data));
        rest = &rest[3 + len..];
    }
    assert!(rest.is_empty(), "trailing bytes {:?}", rest);
    out
}

/// VPs written by the captured output, in order
pub fn written_vps(bytes: &[u8]) -> Vec<u16> {
    frames(bytes).into_iter().map(|(_, vp, _)| vp).collect()
}

/// Screen requests in the captured output
pub fn screen_requests(bytes: &[u8]) -> Vec<u16> {
    frames(bytes)
        .into_iter()
        .filter(|(_, vp, _)| *vp == VP_SCREEN_CHANGE)
        .map(|(_, _, data)| u16::from_be_bytes([data[2], data[3]]))
        .collect()
}

/// Navigate to `screen` and drop everything written so far
pub fn settle_on(
    engine: &mut ScreenEngine<Printer>,
    link: &mut MockTransport,
    printer: &mut Printer,
    screen: u16,
) {
    engine
        .ui(link, printer)
        .goto_screen(dgus_core::ScreenId(screen), false);
    link.clear_tx_buffer();
}
