//! Transport layer for the reader protocol
//!
//! Provides the byte channel the protocol engine talks through, a scoped
//! timeout guard, and a serial port implementation.

pub mod error;
pub mod guard;
pub mod serial;

pub use error::{Error, Result};
pub use guard::{read_exact_or_timeout, TimeoutGuard};
pub use serial::SerialTransport;

use std::time::Duration;

use bytes::BytesMut;

/// Byte channel to a reader
///
/// Reads honour the transport's current timeout: a zero timeout returns
/// immediately with whatever is buffered, a non-zero timeout waits up to
/// that long for data to arrive.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Transport: Send {
    /// Send raw bytes
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Receive up to `max` bytes, waiting at most the configured timeout.
    ///
    /// An empty buffer means nothing arrived in time.
    fn read_available(&mut self, max: usize) -> Result<BytesMut>;

    /// Currently configured read timeout
    fn timeout(&self) -> Duration;

    /// Change the read timeout
    fn set_timeout(&mut self, timeout: Duration) -> Result<()>;

    /// Human readable endpoint description (device path)
    fn endpoint(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn read_available(&mut self, max: usize) -> Result<BytesMut> {
        (**self).read_available(max)
    }

    fn timeout(&self) -> Duration {
        (**self).timeout()
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        (**self).set_timeout(timeout)
    }

    fn endpoint(&self) -> String {
        (**self).endpoint()
    }
}
