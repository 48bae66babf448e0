//! DGUS Hardware Abstraction Layer
//!
//! This crate defines the byte transport the DGUS link runs on. Chip-specific
//! firmware implements [`Transport`] on top of its interrupt-driven UART ring
//! buffers; the protocol and screen engine only ever see this trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dgus-core (screen engine, handlers)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dgus-protocol (frame codec)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dgus-hal (this crate - Transport)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           board UART driver / ISR
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Non-blocking, buffered byte stream
//!
//! With the `mock` feature, [`mock::MockTransport`] provides an in-memory
//! implementation for host tests.

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
extern crate std;

pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use transport::Transport;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
