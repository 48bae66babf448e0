//! Outbound frame writer
//!
//! Frames are streamed straight into the transport's transmit queue, header
//! first. Nothing is buffered here and nothing blocks.

use dgus_hal::Transport;

use crate::frame::{encode_header, CMD_WRITE_VAR, MAX_DATA_SIZE, SCREEN_CHANGE_VP};
use crate::wire;

/// Streams write-variable frames into a transport
pub struct FrameWriter<'a, T: ?Sized> {
    tx: &'a mut T,
}

impl<'a, T: Transport + ?Sized> FrameWriter<'a, T> {
    /// Wrap a transport
    pub fn new(tx: &'a mut T) -> Self {
        Self { tx }
    }

    /// Free space the transport reports in its transmit queue
    pub fn free_send_buffer(&self) -> usize {
        self.tx.free_send_buffer()
    }

    /// Write `length` bytes to `vp`
    ///
    /// Bytes are taken from `data`. Once `data` is exhausted, or for a string
    /// once a NUL is seen, the rest is padded: with spaces for strings, since
    /// the display keeps whatever was there before, and with zeros otherwise.
    pub fn write(&mut self, vp: u16, data: &[u8], length: u8, is_string: bool) {
        let length = length.min(MAX_DATA_SIZE as u8);
        self.tx
            .write_all(&encode_header(CMD_WRITE_VAR, vp, length));

        let pad = if is_string { b' ' } else { 0x00 };
        let mut ended = false;
        for i in 0..usize::from(length) {
            let byte = match data.get(i) {
                Some(&b) if !ended && !(is_string && b == 0) => b,
                _ => {
                    ended = true;
                    pad
                }
            };
            self.tx.write_byte(byte);
        }
    }

    /// Write a raw data block to `vp`
    pub fn write_var(&mut self, vp: u16, data: &[u8]) {
        let length = data.len().min(MAX_DATA_SIZE) as u8;
        self.write(vp, data, length, false);
    }

    /// Write a fixed-width, space-padded string to `vp`
    pub fn write_str(&mut self, vp: u16, text: &str, width: u8) {
        self.write(vp, text.as_bytes(), width, true);
    }

    /// Write one word to `vp`
    pub fn write_u16(&mut self, vp: u16, value: u16) {
        self.write_var(vp, &wire::u16_to_wire(value));
    }

    /// Write one signed word to `vp`
    pub fn write_i16(&mut self, vp: u16, value: i16) {
        self.write_var(vp, &wire::i16_to_wire(value));
    }

    /// Write a signed double word to `vp`
    pub fn write_i32(&mut self, vp: u16, value: i32) {
        self.write_var(vp, &wire::i32_to_wire(value));
    }

    /// Write `value` scaled by `10^decimals` as a `width`-byte integer
    pub fn write_fixed(&mut self, vp: u16, value: f32, decimals: u8, width: u8) {
        let (bytes, len) = wire::fixed_to_wire(value, decimals, width);
        self.write_var(vp, &bytes[..len]);
    }

    /// Ask the display to show `screen`
    pub fn request_screen(&mut self, screen: u16) {
        let [hi, lo] = wire::u16_to_wire(screen);
        self.write_var(SCREEN_CHANGE_VP, &[0x5A, 0x01, hi, lo]);
    }
}
