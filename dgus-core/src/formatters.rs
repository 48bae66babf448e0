//! Standard outbound formatters
//!
//! Each formatter renders the firmware value bound to a VP and writes it to
//! the panel. They are referenced from the registry table as `tx` handlers.

use core::fmt::{self, Write};

use dgus_protocol::FrameWriter;
use heapless::String;

use crate::registry::VpVar;
use crate::traits::Firmware;
use crate::ui::Ui;

fn bound_word<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) -> Option<u16> {
    let value = match var.var {
        Some(binding) => binding.read_word(&mut *ui.firmware),
        None => None,
    };
    if value.is_none() {
        dgus_debug!("VP {} has no integer binding", var.vp);
    }
    value
}

/// Integer binding as one big-endian word
pub fn word<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    if let Some(value) = bound_word(ui, var) {
        ui.writer().write_u16(var.vp, value);
    }
}

/// 8-bit binding (0 to 255) shown as a percentage
pub fn percentage<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    if let Some(value) = bound_word(ui, var) {
        let percent = (u32::from(value.min(255)) + 1) * 100 / 255;
        ui.writer().write_u16(var.vp, percent as u16);
    }
}

/// Numeric binding as fixed point with `DECIMALS` decimal places, 2 or 4
/// bytes wide depending on the VP size
pub fn fixed<M: 'static, const DECIMALS: u8>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    let value = match var.var {
        Some(binding) => binding.read_f32(&mut *ui.firmware),
        None => None,
    };
    let Some(value) = value else {
        dgus_debug!("VP {} has no numeric binding", var.vp);
        return;
    };
    ui.writer().write_fixed(var.vp, value, DECIMALS, var.size);
}

/// Text binding, space-padded to the VP size
pub fn string<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    let text = match var.var {
        Some(binding) => binding.text(&*ui.firmware),
        None => None,
    };
    let Some(text) = text else {
        dgus_debug!("VP {} has no text binding", var.vp);
        return;
    };
    FrameWriter::new(&mut *ui.tx).write_str(var.vp, text, var.size);
}

/// Any non-zero value as `1`
pub fn on_off<M: 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    if let Some(value) = bound_word(ui, var) {
        ui.writer().write_u16(var.vp, u16::from(value != 0));
    }
}

/// Elapsed print time as text
pub fn print_time<M: Firmware + 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    let mut text: String<20> = String::new();
    // 20 bytes hold the longest u32 duration
    let _ = format_duration(&mut text, ui.firmware.elapsed_print_secs());
    ui.writer().write_str(var.vp, &text, var.size);
}

/// Job progress percentage
pub fn print_progress<M: Firmware + 'static>(ui: &mut Ui<'_, M>, var: &VpVar<M>) {
    let percent = u16::from(ui.firmware.progress_percent().min(100));
    ui.writer().write_u16(var.vp, percent);
}

/// `HHhMMmSSs`, prefixed with `Dd` once a day has passed
pub fn format_duration<W: Write>(out: &mut W, secs: u32) -> fmt::Result {
    let days = secs / 86_400;
    let hours = secs / 3600 % 24;
    let minutes = secs / 60 % 60;
    let seconds = secs % 60;
    if days > 0 {
        write!(out, "{days}d")?;
    }
    write!(out, "{hours:02}h{minutes:02}m{seconds:02}s")
}
