//! Reader information structures

use std::fmt;

use bytes::Bytes;

/// Reader information returned by the get-info command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderInfo {
    /// Description string (e.g. "ID card reader & writer")
    pub description: String,

    /// Payload as received
    pub raw: Bytes,
}

impl ReaderInfo {
    /// Decode the payload as text, dropping trailing NUL padding
    pub fn from_payload(raw: Bytes) -> Self {
        let description = String::from_utf8_lossy(&raw)
            .trim_end_matches('\0')
            .to_string();

        Self { description, raw }
    }
}

impl fmt::Display for ReaderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
