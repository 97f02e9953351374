//! Error types for emission and listing.
//!
//! Only boundary failures are reported through these types. Violations of
//! the assembler's own invariants (queue underflow, a label resolved twice,
//! an operand with no active instruction) are programming errors in the code
//! generator and panic instead.

use std::io;

use thiserror::Error;

// ============================================================================
// Emission Errors
// ============================================================================

/// Errors raised while flushing a compilation unit into an output sink.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The sink failed to seek or write.
    #[error("output sink error: {0}")]
    Sink(#[from] io::Error),

    /// A label or reference landed beyond the 32-bit address space.
    #[error("code offset {offset} does not fit in 32 bits")]
    OffsetOverflow { offset: u64 },
}

// ============================================================================
// Listing Errors
// ============================================================================

/// Errors raised while decoding a flushed instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// The stream ended in the middle of an instruction.
    #[error("instruction stream truncated at offset {offset}")]
    Truncated { offset: u64 },

    /// An opcode number outside the instruction set.
    #[error("unknown opcode {code} at offset {offset}")]
    UnknownOpcode { code: u32, offset: u64 },

    /// A variable-length instruction carried a negative count.
    #[error("invalid operand count {count} at offset {offset}")]
    InvalidCount { count: i32, offset: u64 },
}

impl ListingError {
    /// Get the stream offset where decoding failed.
    pub fn offset(&self) -> u64 {
        match self {
            ListingError::Truncated { offset } => *offset,
            ListingError::UnknownOpcode { offset, .. } => *offset,
            ListingError::InvalidCount { offset, .. } => *offset,
        }
    }
}
