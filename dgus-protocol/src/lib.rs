//! DGUS Display Communication Protocol
//!
//! This crate implements the framed binary protocol spoken by DGUS serial
//! touchscreen panels. The controller writes variables ("VPs", 16-bit
//! addresses) into the display; the display reports touched controls and
//! edited values back as variable reads.
//!
//! # Protocol Overview
//!
//! Every message uses the same frame:
//! ```text
//! ┌──────┬──────┬─────┬─────┬──────┬──────┬──────────────┐
//! │ 0x5A │ 0xA5 │ LEN │ CMD │ VPhi │ VPlo │ DATA         │
//! │ 1B   │ 1B   │ 1B  │ 1B  │ 1B   │ 1B   │ LEN - 3 B    │
//! └──────┴──────┴─────┴─────┴──────┴──────┴──────────────┘
//! ```
//!
//! `LEN` counts everything after itself. There is no checksum; a receiver
//! resynchronises only when the next header happens to match.
//!
//! All multi-byte integers travel big-endian. The conversions live in
//! [`wire`] and are applied by [`FrameWriter`] and by the handlers that
//! decode [`VarData`]; nothing else swaps bytes.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod parser;
pub mod wire;
pub mod writer;

pub use frame::{
    Datagram, FrameError, VarData, CMD_READ_VAR, CMD_WRITE_VAR, FRAME_OVERHEAD, HEADER1, HEADER2,
    MAX_DATA_SIZE, MIN_FRAME_LEN, RX_BUFFER_SIZE, SCREEN_CHANGE_VP,
};
pub use parser::FrameParser;
pub use writer::FrameWriter;
