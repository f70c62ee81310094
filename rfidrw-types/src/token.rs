//! Card token
//!
//! A token is a 40-bit unsigned integer stored big-endian in 5 bytes on the
//! card. Raw bytes, a hex string and a decimal number are three spellings of
//! the same value.

use std::fmt;

use rfidrw_core::codec;
use rfidrw_core::constants::TOKEN_WIDTH;

use crate::error::{Error, Result};

/// Card token value
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Token {
    /// Largest value representable on the card
    pub const MAX: u64 = (1 << (8 * TOKEN_WIDTH)) - 1;

    /// Create a token, rejecting values wider than 40 bits
    pub fn new(value: u64) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::Validation(format!(
                "token {} exceeds maximum {}",
                value,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// Decode the 5-byte card representation
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TOKEN_WIDTH {
            return Err(Error::Validation(format!(
                "token must be {} bytes, got {}",
                TOKEN_WIDTH,
                bytes.len()
            )));
        }
        Ok(Self(codec::bytes_to_token(bytes)))
    }

    /// Parse a hex string such as `"00 12 34 56 78"`
    pub fn parse_hex(input: &str) -> Result<Self> {
        let bytes = codec::hex_to_bytes(input)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a decimal string such as `"305419896"`
    pub fn parse_decimal(input: &str) -> Result<Self> {
        let value = input
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::Parse(format!("{:?}: {}", input, e)))?;
        Self::new(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// 5-byte big-endian card representation
    pub fn to_bytes(self) -> [u8; TOKEN_WIDTH] {
        codec::token_to_array(self.0)
    }

    /// Space separated hex form of [`Token::to_bytes`]
    pub fn to_hex(self) -> String {
        codec::bytes_to_hex(&self.to_bytes())
    }
}

impl From<Token> for u64 {
    fn from(token: Token) -> u64 {
        token.0
    }
}

impl TryFrom<u64> for Token {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
