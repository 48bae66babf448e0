//! Mock transport for testing
//!
//! Provides in-memory queues for both directions so that unit tests can feed
//! the frame parser and inspect what the screen engine wrote.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::transport::Transport;

/// Mock transport
///
/// The free-send-buffer estimate is fixed by the test (unlimited by default)
/// and does not shrink as bytes are written.
///
/// # Example
///
/// ```
/// use dgus_hal::{MockTransport, Transport};
///
/// let mut link = MockTransport::new();
///
/// link.write_all(&[0x5A, 0xA5]);
/// assert_eq!(link.tx_buffer(), &[0x5A, 0xA5]);
///
/// link.inject_rx_data(&[0x01]);
/// assert_eq!(link.available(), 1);
/// assert_eq!(link.read_byte(), Some(0x01));
///
/// link.set_free_send_buffer(8);
/// assert_eq!(link.free_send_buffer(), 8);
/// ```
#[derive(Debug)]
pub struct MockTransport {
    tx_buffer: Vec<u8>,
    rx_buffer: VecDeque<u8>,
    free_send_buffer: usize,
    overrun: bool,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a new mock transport with an unlimited send buffer estimate
    pub fn new() -> Self {
        Self {
            tx_buffer: Vec::new(),
            rx_buffer: VecDeque::new(),
            free_send_buffer: usize::MAX,
            overrun: false,
        }
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> &[u8] {
        &self.tx_buffer
    }

    /// Take and clear transmitted data
    pub fn take_tx(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx_buffer)
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&mut self) {
        self.tx_buffer.clear();
    }

    /// Inject receive data (for test setup)
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        self.rx_buffer.extend(data.iter().copied());
    }

    /// Fix the free-send-buffer estimate reported to the engine
    pub fn set_free_send_buffer(&mut self, free: usize) {
        self.free_send_buffer = free;
    }

    /// Flag a receive overrun, as the RX interrupt would
    pub fn flag_overrun(&mut self) {
        self.overrun = true;
    }
}

impl Transport for MockTransport {
    fn available(&self) -> usize {
        self.rx_buffer.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx_buffer.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx_buffer.push(byte);
    }

    fn free_send_buffer(&self) -> usize {
        self.free_send_buffer
    }

    fn take_overrun(&mut self) -> bool {
        core::mem::replace(&mut self.overrun, false)
    }
}
