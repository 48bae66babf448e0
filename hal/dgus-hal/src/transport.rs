//! Byte transport between the controller and the display
//!
//! The transport is an unreliable, unframed byte stream. Reception is
//! interrupt driven and buffered below this layer; transmission is queued into
//! a fixed-size ring buffer that drains in the background.

/// Buffered serial byte stream
///
/// None of these operations may block. Writes are fire-and-forget: the caller
/// consults [`Transport::free_send_buffer`] before large writes if it wants to
/// avoid overrunning the transmit queue.
pub trait Transport {
    /// Number of received bytes waiting to be read
    fn available(&self) -> usize;

    /// Read the next received byte
    ///
    /// Returns `None` when nothing is available.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue one byte for transmission
    fn write_byte(&mut self, byte: u8);

    /// Estimated free space in the transmit queue, in bytes
    fn free_send_buffer(&self) -> usize;

    /// Queue a slice for transmission
    fn write_all(&mut self, data: &[u8]) {
        for &byte in data {
            self.write_byte(byte);
        }
    }

    /// Report and clear a receive overrun
    ///
    /// Drivers that detect ring buffer overflow return `true` once per
    /// overrun. The default reports none.
    fn take_overrun(&mut self) -> bool {
        false
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn available(&self) -> usize {
        (**self).available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }

    fn free_send_buffer(&self) -> usize {
        (**self).free_send_buffer()
    }

    fn write_all(&mut self, data: &[u8]) {
        (**self).write_all(data)
    }

    fn take_overrun(&mut self) -> bool {
        (**self).take_overrun()
    }
}
