//! # rfidrw-core
//!
//! Core protocol implementation for 125KHz RFID reader/writers speaking
//! the `AA DD 00` serial protocol.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure, encoding and response validation
//! - XOR checksum calculation
//! - Hex and big-endian token codecs
//! - Opcode definitions
//! - Protocol constants

pub mod checksum;
pub mod codec;
pub mod constants;
pub mod error;
pub mod frame;
pub mod opcode;

pub use error::{Error, Result};
pub use frame::{Frame, Response};
pub use opcode::Opcode;

/// Fixed preamble opening every frame
pub const PREAMBLE: [u8; 3] = [0xAA, 0xDD, 0x00];

/// Maximum payload size of a request frame
pub const MAX_PAYLOAD_SIZE: usize = 252;

/// Size of the preamble plus the length byte
pub const HEADER_SIZE: usize = 4;
