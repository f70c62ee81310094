//! Error types for rfidrw-core

use bytes::Bytes;

use crate::codec::bytes_to_hex;
use crate::opcode::Opcode;

/// Result type alias for rfidrw-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Hex input could not be decoded
    #[error("Invalid encoding {input:?}: {reason}")]
    InvalidEncoding { input: String, reason: String },

    /// Caller passed an opcode or payload the frame format cannot carry
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// Opcode value not known to this reader family
    #[error("Unknown opcode: 0x{0:04X}")]
    UnknownOpcode(u16),

    /// Response has a bad length, preamble or opcode echo
    #[error("Malformed response ({reason}): sent [{}], received [{}]", bytes_to_hex(.sent), bytes_to_hex(.received))]
    MalformedResponse {
        reason: &'static str,
        sent: Bytes,
        received: Bytes,
    },

    /// Response checksum does not fold to zero
    #[error("Checksum mismatch (residue 0x{residue:02X}): sent [{}], received [{}]", bytes_to_hex(.sent), bytes_to_hex(.received))]
    ChecksumMismatch {
        residue: u8,
        sent: Bytes,
        received: Bytes,
    },

    /// Reader returned a status other than the one required
    #[error("Device error #{status} for {opcode}: sent [{}], received [{}]", bytes_to_hex(.sent), bytes_to_hex(.received))]
    DeviceError {
        opcode: Opcode,
        status: u8,
        sent: Bytes,
        received: Bytes,
    },
}

impl Error {
    /// Check if error is recoverable (retrying the operation might succeed)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse { .. } | Self::ChecksumMismatch { .. } | Self::DeviceError { .. }
        )
    }

    /// Status byte reported by the reader, if this is a device error
    pub fn device_status(&self) -> Option<u8> {
        match self {
            Self::DeviceError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
