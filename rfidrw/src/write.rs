//! Write-then-verify sequence
//!
//! The reader's write command can report success without the token sticking
//! to the card, and some tags only accept the alternate write opcode. A
//! write is only considered done once the token reads back unchanged. The
//! sequence is bounded: one write with each opcode, each followed by a
//! read-back.
//!
//! ```text
//! Attempt1 ──▶ Verify1 ──match──▶ Done
//!                 │
//!              mismatch
//!                 ▼
//!             Attempt2 ──▶ Verify2 ──match──▶ Done
//!                             │
//!                          mismatch
//!                             ▼
//!                           Failed
//! ```

use std::fmt;

/// Step of a token write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    /// Write with [`Opcode::WriteToken`]
    Attempt1,
    /// Read back after the first write
    Verify1,
    /// Write with [`Opcode::WriteTokenAlt`]
    Attempt2,
    /// Read back after the second write
    Verify2,
    /// Token read back as written
    Done,
    /// Both read-backs mismatched
    Failed,
}

impl WriteState {
    /// Check if the sequence has finished
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// State after the write in an attempt state was acknowledged
    pub fn written(self) -> Self {
        match self {
            Self::Attempt1 => Self::Verify1,
            Self::Attempt2 => Self::Verify2,
            other => other,
        }
    }

    /// State after a read-back in a verify state
    pub fn verified(self, matched: bool) -> Self {
        match (self, matched) {
            (Self::Verify1 | Self::Verify2, true) => Self::Done,
            (Self::Verify1, false) => Self::Attempt2,
            (Self::Verify2, false) => Self::Failed,
            (other, _) => other,
        }
    }
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Attempt1 => "attempt 1",
            Self::Verify1 => "verify 1",
            Self::Attempt2 => "attempt 2",
            Self::Verify2 => "verify 2",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
