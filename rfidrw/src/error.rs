//! High-level error types

use std::time::Duration;

use bytes::Bytes;
use rfidrw_core::codec::bytes_to_hex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] rfidrw_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] rfidrw_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] rfidrw_types::Error),

    #[error("Operation timed out after {timeout:?}: sent [{}]", bytes_to_hex(.sent))]
    Timeout { sent: Bytes, timeout: Duration },

    #[error("Write failed: expected [{}], read back {}", bytes_to_hex(.expected), describe_read_back(.actual))]
    WriteVerificationFailed {
        expected: Bytes,
        actual: Option<Bytes>,
    },
}

impl Error {
    /// Check if error is recoverable (retrying the whole operation might succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(e) => e.is_recoverable(),
            Self::Timeout { .. } | Self::WriteVerificationFailed { .. } => true,
            Self::Transport(_) | Self::Types(_) => false,
        }
    }

    /// Status byte reported by the reader, if the reader rejected a command
    pub fn device_status(&self) -> Option<u8> {
        match self {
            Self::Core(e) => e.device_status(),
            _ => None,
        }
    }
}

fn describe_read_back(actual: &Option<Bytes>) -> String {
    match actual {
        Some(bytes) => format!("[{}]", bytes_to_hex(bytes)),
        None => "no card".to_string(),
    }
}
