//! Frame layout and datagram types for the DGUS protocol.
//!
//! Frame format:
//! - HEADER (2 bytes): 0x5A 0xA5
//! - LEN (1 byte): number of bytes following, command included
//! - CMD (1 byte): 0x82 write variable, 0x83 read variable
//! - VP (2 bytes): big-endian variable address
//! - DATA (LEN - 3 bytes): command-specific data

use heapless::Vec;

/// First header byte
pub const HEADER1: u8 = 0x5A;

/// Second header byte
pub const HEADER2: u8 = 0xA5;

/// Write variable(s) into display memory
pub const CMD_WRITE_VAR: u8 = 0x82;

/// Read variable(s); also used by the display to report changed values
pub const CMD_READ_VAR: u8 = 0x83;

/// Display register that switches the visible page
pub const SCREEN_CHANGE_VP: u16 = 0x0084;

/// Bytes a write frame adds around its data (header, LEN, CMD, VP)
pub const FRAME_OVERHEAD: usize = 6;

/// Largest accepted inbound LEN; also the size of the receive scratch buffer
pub const RX_BUFFER_SIZE: usize = 128;

/// Smallest valid LEN: the command plus one word
pub const MIN_FRAME_LEN: u8 = 3;

/// Largest data block an outbound write can carry (LEN is a single byte)
pub const MAX_DATA_SIZE: usize = u8::MAX as usize - 3;

/// Data block of a display-originated variable report
pub type RxData = Vec<u8, RX_BUFFER_SIZE>;

/// Errors detected while decoding the inbound stream
///
/// None of these are fatal: the parser is already back in its idle state when
/// one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// LEN byte outside `MIN_FRAME_LEN..=RX_BUFFER_SIZE`
    LengthOutOfRange(u8),
    /// A read-variable datagram too short to carry VP and word count
    Truncated,
    /// The transport dropped bytes; the frame in progress was abandoned
    Overrun,
}

/// A complete inbound datagram
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Datagram {
    /// The display's "OK" acknowledgement of a write
    WriteAck,
    /// A variable reported by the display (touch, edited value)
    VarChanged(VarData),
    /// Any other command; carries no meaning for the controller
    Other {
        /// Command byte
        command: u8,
    },
}

/// Payload of a `0x83` read-variable datagram
///
/// ```text
/// 5A A5 06 83 20 01 01 78 01
///          │  └─┬─┘  │  └─┬─┘
///          │   VP  words DATA
///          CMD
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VarData {
    /// Variable address
    pub vp: u16,
    /// Word count the display declared for `data`
    pub words: u8,
    data: RxData,
}

impl VarData {
    /// Build a report from its parts
    ///
    /// Data beyond `RX_BUFFER_SIZE` is dropped.
    pub fn new(vp: u16, words: u8, data: &[u8]) -> Self {
        let len = data.len().min(RX_BUFFER_SIZE);
        let mut buf = RxData::new();
        // Cannot fail: len is bounded by the capacity
        let _ = buf.extend_from_slice(&data[..len]);
        Self {
            vp,
            words,
            data: buf,
        }
    }

    /// The data block, starting right after the word count byte
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared data length in bytes
    pub fn declared_len(&self) -> usize {
        usize::from(self.words) * 2
    }
}

/// Wire length of a write frame carrying `data_len` bytes
pub const fn encoded_len(data_len: usize) -> usize {
    FRAME_OVERHEAD + data_len
}

/// Encode the six header bytes of a frame
pub fn encode_header(command: u8, vp: u16, data_len: u8) -> [u8; FRAME_OVERHEAD] {
    let [hi, lo] = vp.to_be_bytes();
    [
        HEADER1,
        HEADER2,
        data_len.saturating_add(3),
        command,
        hi,
        lo,
    ]
}
