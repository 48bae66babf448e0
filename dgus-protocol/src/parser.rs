//! Resumable inbound frame parser
//!
//! The parser pulls bytes from the transport only while it can make progress.
//! Once a header and length have been seen it waits until the whole rest of
//! the frame is buffered by the transport, then consumes it in one go; a
//! partially received frame is never half-consumed.

use dgus_hal::Transport;
use heapless::Vec;

use crate::frame::{
    Datagram, FrameError, RxData, VarData, CMD_READ_VAR, CMD_WRITE_VAR, HEADER1, HEADER2,
    MIN_FRAME_LEN, RX_BUFFER_SIZE,
};

/// Parser position within the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseState {
    /// Waiting for the first header byte
    Idle,
    /// Got 0x5A, waiting for 0xA5
    Header1Seen,
    /// Got the full header, waiting for LEN
    Header2Seen,
    /// Got LEN, waiting for that many bytes to be available
    AwaitingPayload {
        /// Bytes still to read, command included
        remaining: u8,
    },
}

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: RxData,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Idle,
            buffer: Vec::new(),
        }
    }

    /// Current parser state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.buffer.clear();
    }

    /// Advance over the bytes currently available
    ///
    /// Returns `Ok(Some(datagram))` as soon as one frame is complete; call
    /// again to continue with the bytes after it. `Ok(None)` means the
    /// transport has nothing more that can be used right now. On `Err` the
    /// offending frame has been dropped and the parser is idle again.
    pub fn poll<T: Transport + ?Sized>(
        &mut self,
        rx: &mut T,
    ) -> Result<Option<Datagram>, FrameError> {
        // Only resync on overrun once the queue is drained, so that the
        // complete frames still sitting in it are extracted first.
        if rx.available() == 0 {
            if rx.take_overrun() {
                self.reset();
                return Err(FrameError::Overrun);
            }
            return Ok(None);
        }

        while rx.available() > 0 {
            match self.state {
                ParseState::Idle => {
                    if rx.read_byte() == Some(HEADER1) {
                        self.state = ParseState::Header1Seen;
                    }
                }
                ParseState::Header1Seen => {
                    self.state = if rx.read_byte() == Some(HEADER2) {
                        ParseState::Header2Seen
                    } else {
                        ParseState::Idle
                    };
                }
                ParseState::Header2Seen => {
                    let len = rx.read_byte().unwrap_or(0);
                    if !(MIN_FRAME_LEN..=RX_BUFFER_SIZE as u8).contains(&len) {
                        self.reset();
                        return Err(FrameError::LengthOutOfRange(len));
                    }
                    self.state = ParseState::AwaitingPayload { remaining: len };
                }
                ParseState::AwaitingPayload { remaining } => {
                    if rx.available() < usize::from(remaining) {
                        return Ok(None);
                    }
                    return self.take_frame(rx, remaining).map(Some);
                }
            }
        }

        Ok(None)
    }

    /// Consume command and data of a frame known to be fully buffered
    fn take_frame<T: Transport + ?Sized>(
        &mut self,
        rx: &mut T,
        len: u8,
    ) -> Result<Datagram, FrameError> {
        self.buffer.clear();
        let command = rx.read_byte().unwrap_or(0);
        for _ in 1..len {
            match rx.read_byte() {
                // Cannot overflow: len <= RX_BUFFER_SIZE
                Some(byte) => {
                    let _ = self.buffer.push(byte);
                }
                None => break,
            }
        }
        self.state = ParseState::Idle;
        self.decode(command)
    }

    fn decode(&self, command: u8) -> Result<Datagram, FrameError> {
        match (command, self.buffer.as_slice()) {
            // 5A A5 03 82 4F 4B
            (CMD_WRITE_VAR, [b'O', b'K', ..]) => Ok(Datagram::WriteAck),
            (CMD_READ_VAR, [hi, lo, words, data @ ..]) => Ok(Datagram::VarChanged(VarData::new(
                u16::from_be_bytes([*hi, *lo]),
                *words,
                data,
            ))),
            (CMD_READ_VAR, _) => Err(FrameError::Truncated),
            (command, _) => Ok(Datagram::Other { command }),
        }
    }
}
