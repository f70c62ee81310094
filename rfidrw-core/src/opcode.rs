//! Reader opcode definitions

use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Protocol opcodes
///
/// Every opcode is a 2-byte pair sent big-endian right after the length
/// byte, and echoed back by the reader in its response.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    /// Query the reader description string
    GetInfo = 0x0102,

    /// Sound the buzzer
    Beep = 0x0103,

    /// Set the indicator LED
    SetLed = 0x0104,

    /// Read the token of the card in the field
    ReadToken = 0x010C,

    /// Write a token to the card in the field
    WriteToken = 0x020C,

    /// Fallback write command used by some tag variants
    WriteTokenAlt = 0x030C,
}

impl Opcode {
    /// Encoded size of an opcode
    pub const SIZE: usize = 2;

    /// Opcode as it appears on the wire
    pub fn to_bytes(self) -> [u8; 2] {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, self.into());
        buf
    }

    /// Get opcode name
    pub fn name(self) -> &'static str {
        match self {
            Self::GetInfo => "GET_INFO",
            Self::Beep => "BEEP",
            Self::SetLed => "SET_LED",
            Self::ReadToken => "READ_TOKEN",
            Self::WriteToken => "WRITE_TOKEN",
            Self::WriteTokenAlt => "WRITE_TOKEN_ALT",
        }
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> u16 {
        op as u16
    }
}

impl TryFrom<u16> for Opcode {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0102 => Ok(Self::GetInfo),
            0x0103 => Ok(Self::Beep),
            0x0104 => Ok(Self::SetLed),
            0x010C => Ok(Self::ReadToken),
            0x020C => Ok(Self::WriteToken),
            0x030C => Ok(Self::WriteTokenAlt),
            _ => Err(Error::UnknownOpcode(value)),
        }
    }
}

impl TryFrom<&[u8]> for Opcode {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::SIZE {
            return Err(Error::ProtocolViolation(format!(
                "opcode must be {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }
        Self::try_from(BigEndian::read_u16(bytes))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.to_bytes();
        write!(f, "{}({:02x} {:02x})", self.name(), hi, lo)
    }
}
