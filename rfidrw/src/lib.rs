//! # rfidrw
//!
//! Rust driver for the cheap 125KHz RFID reader/writers (EM4100 tags) that
//! speak the `AA DD 00` serial protocol and answer "ID card reader & writer".
//!
//! ## Features
//!
//! - Type-safe frame encoding and response validation
//! - Blocking API over any byte [`Transport`], serial port included
//! - Write-then-verify token writes with the alternate opcode fallback
//! - Comprehensive error handling with the raw frames attached
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfidrw::Reader;
//!
//! fn main() -> rfidrw::Result<()> {
//!     let mut reader = Reader::open("/dev/ttyUSB0")?;
//!
//!     reader.beep(10)?;
//!     reader.write_token(305419896)?;
//!     assert_eq!(reader.read_token()?, Some(305419896));
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod reader;
pub mod transceiver;
pub mod write;

#[cfg(test)]
mod testing;

// Re-exports
pub use error::{Error, Result};
pub use reader::Reader;
pub use transceiver::Transceiver;
pub use write::WriteState;

// Re-export types
pub use rfidrw_core::{codec, constants, Frame, Opcode, Response};
pub use rfidrw_transport::{SerialTransport, Transport};
pub use rfidrw_types::{Indicator, ReaderInfo, Token};
