//! Representative inbound handlers
//!
//! Handlers receive the payload of a variable-changed report (big-endian,
//! starting after the VP address and word count) and turn it into firmware
//! actions. Commands are queued without waiting; a full queue drops the
//! command with a warning.

use core::fmt::Write;

use dgus_protocol::wire;
use heapless::String;

use crate::registry::VpVar;
use crate::traits::Firmware;
use crate::ui::Ui;

/// Feedrate of manual X/Y moves, mm/min
pub const MOVE_FEEDRATE_XY: u16 = 1500;

/// Feedrate of manual Z moves, mm/min
pub const MOVE_FEEDRATE_Z: u16 = 300;

fn enqueue<M: Firmware>(firmware: &mut M, command: &str) -> bool {
    match firmware.enqueue(command) {
        Ok(()) => true,
        Err(_) => {
            dgus_warn!("command queue full, dropped {}", command);
            false
        }
    }
}

fn word(data: &[u8]) -> u16 {
    wire::read_u16(data).unwrap_or(0)
}

/// The panel switched screens on its own
pub fn screen_change<M: 'static>(ui: &mut Ui<'_, M>, _var: &VpVar<M>, data: &[u8]) {
    ui.on_remote_screen_change(data);
}

/// Screen change honoured only while no job is running
///
/// During a print the panel is sent back to the current screen.
pub fn screen_change_if_idle<M: Firmware + 'static>(
    ui: &mut Ui<'_, M>,
    _var: &VpVar<M>,
    data: &[u8],
) {
    if ui.firmware.is_printing() {
        let current = ui.current_screen();
        dgus_debug!("printing, staying on screen {}", current.0);
        ui.writer().request_screen(current.0);
    } else {
        ui.on_remote_screen_change(data);
    }
}

/// OK on the confirm dialog
pub fn confirmed_ok<M: 'static>(ui: &mut Ui<'_, M>, _var: &VpVar<M>, data: &[u8]) {
    ui.confirmed_ok(data);
}

pub fn all_heaters_off<M: Firmware + 'static>(ui: &mut Ui<'_, M>, _var: &VpVar<M>, _data: &[u8]) {
    ui.firmware.disable_all_heaters();
    ui.force_complete_update();
}

/// New target temperature for `HEATER` (`BED_HEATER` for the bed)
///
/// If the firmware clamps the value, the accepted one is sent back at once.
/// The next update of this VP is suppressed since the panel may still be
/// incrementing it locally.
pub fn temperature_changed<M: Firmware + 'static, const HEATER: u8>(
    ui: &mut Ui<'_, M>,
    var: &VpVar<M>,
    data: &[u8],
) {
    let requested = word(data);
    let accepted = ui.firmware.set_target_temperature(HEATER, requested);
    if let Some(binding) = var.var {
        binding.write_word(&mut *ui.firmware, accepted);
    }
    if accepted != requested {
        dgus_debug!("heater {} target {} clamped to {}", HEATER, requested, accepted);
        if let Some(formatter) = var.tx {
            formatter(ui, var);
        }
    }
    ui.skip_next_update(var.vp);
}

/// 0 to 100 from the panel stored as 0 to 255
pub fn percentage_to_u8<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>, data: &[u8]) {
    let percent = u32::from(word(data).min(100));
    if let Some(binding) = var.var {
        binding.write_word(&mut *ui.firmware, (percent * 255 / 100) as u16);
    }
}

/// Store the received word in the bound variable
pub fn set_word<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>, data: &[u8]) {
    if let Some(binding) = var.var {
        binding.write_word(&mut *ui.firmware, word(data));
    }
}

/// Store a fixed-point value with `DECIMALS` places in the bound float
pub fn set_fixed<M: 'static, const DECIMALS: u8>(ui: &mut Ui<'_, M>, var: &VpVar<M>, data: &[u8]) {
    let Some(value) = wire::fixed_from_wire(data, DECIMALS, var.size) else {
        return;
    };
    if let Some(binding) = var.var {
        binding.write_f32(&mut *ui.firmware, value);
    }
    ui.skip_next_update(var.vp);
}

/// Jog `AXIS` by the received distance in hundredths of a millimetre
///
/// A distance of zero homes the axis. Moves are issued relative and the
/// previous positioning mode and feedrate are restored afterwards.
pub fn manual_move<M: Firmware + 'static, const AXIS: char>(
    ui: &mut Ui<'_, M>,
    _var: &VpVar<M>,
    data: &[u8],
) {
    let distance = i32::from(wire::read_i16(data).unwrap_or(0));
    if !ui.firmware.can_move(AXIS) {
        dgus_debug!("axis {} cannot move", AXIS);
        return;
    }

    let mut command: String<32> = String::new();
    if distance == 0 {
        let _ = write!(command, "G28 {}", AXIS);
        enqueue(&mut *ui.firmware, &command);
        ui.force_complete_update();
        return;
    }

    let speed = if AXIS == 'Z' {
        MOVE_FEEDRATE_Z
    } else {
        MOVE_FEEDRATE_XY
    };
    let was_relative = ui.firmware.relative_mode();
    let restore_speed = ui.firmware.feedrate_mm_min();

    if !was_relative {
        enqueue(&mut *ui.firmware, "G91");
    }
    let sign = if distance < 0 { "-" } else { "" };
    let _ = write!(
        command,
        "G0 {}{}{}.{:02} F{}",
        AXIS,
        sign,
        distance.abs() / 100,
        distance.abs() % 100,
        speed
    );
    enqueue(&mut *ui.firmware, &command);
    if restore_speed != speed {
        command.clear();
        let _ = write!(command, "G0 F{}", restore_speed);
        enqueue(&mut *ui.firmware, &command);
    }
    if !was_relative {
        enqueue(&mut *ui.firmware, "G90");
    }
    ui.force_complete_update();
}

pub fn home_all<M: Firmware + 'static>(ui: &mut Ui<'_, M>, _var: &VpVar<M>, _data: &[u8]) {
    enqueue(&mut *ui.firmware, "G28");
    ui.force_complete_update();
}

/// Non-zero releases the steppers, zero engages them
pub fn motor_lock<M: Firmware + 'static>(ui: &mut Ui<'_, M>, _var: &VpVar<M>, data: &[u8]) {
    let command = if word(data) != 0 { "M18" } else { "M17" };
    enqueue(&mut *ui.firmware, command);
}

/// 1: factory reset and save, 2: load, 3: save
pub fn settings<M: Firmware + 'static>(ui: &mut Ui<'_, M>, _var: &VpVar<M>, data: &[u8]) {
    match word(data) {
        1 => {
            if enqueue(&mut *ui.firmware, "M502") {
                enqueue(&mut *ui.firmware, "M500");
            }
        }
        2 => {
            enqueue(&mut *ui.firmware, "M501");
        }
        3 => {
            enqueue(&mut *ui.firmware, "M500");
        }
        other => dgus_debug!("unknown settings action {}", other),
    }
    ui.force_complete_update();
}

/// Toggle the bound fan between off and full speed
pub fn fan_toggle<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>, _data: &[u8]) {
    let Some(binding) = var.var else {
        return;
    };
    let running = binding.read_word(&mut *ui.firmware).unwrap_or(0) > 0;
    binding.write_word(&mut *ui.firmware, if running { 0 } else { 255 });
}

/// Toggle the bound heater target between off and `PREHEAT`
pub fn heater_toggle<M: 'static, const PREHEAT: i16>(
    ui: &mut Ui<'_, M>,
    var: &VpVar<M>,
    _data: &[u8],
) {
    let Some(binding) = var.var else {
        return;
    };
    let target = binding.read_word(&mut *ui.firmware).unwrap_or(0) as i16;
    let next = if target > 0 { 0 } else { PREHEAT };
    binding.write_word(&mut *ui.firmware, next as u16);
}
