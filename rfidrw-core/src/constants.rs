//! Protocol constants

use std::time::Duration;

/// Default serial line speed of the reader
pub const DEFAULT_BAUD_RATE: u32 = 38_400;

/// Default time to wait for the first byte of a reply
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause after sending a frame and before draining the rest of a reply.
///
/// Empirical: the reader needs some processing time before it starts
/// answering, and replies may arrive in more than one chunk.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on bytes collected by the drain read
pub const DRAIN_LIMIT: usize = 1000;

/// Width of a token on the card, in bytes
pub const TOKEN_WIDTH: usize = 5;

/// Default beep duration passed to the reader
pub const DEFAULT_BEEP_DURATION: u8 = 10;

/// Status codes found in the first payload byte of every response
pub mod status {
    /// Command succeeded
    pub const OK: u8 = 0x00;

    /// No card in the field (only meaningful for a read-token response)
    pub const NO_CARD: u8 = 0x01;
}

/// Lock flag prefixed to a write-token payload
pub mod lock {
    /// Leave the card writable
    pub const UNLOCKED: u8 = 0x00;

    /// Ask the reader to lock the card after writing
    pub const LOCKED: u8 = 0x01;
}
