//! Error types for text controls.

use thiserror::Error;

/// Errors raised by caller-contract violations.
///
/// Policy rejections (read-only control, maximum length reached) are not
/// errors; they are reported through notifications or ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Offsets outside `0 <= start <= end <= len`.
    #[error("Invalid range: {start}..{end} (length {len})")]
    InvalidRange {
        /// Requested start offset
        start: usize,
        /// Requested end offset, after resolving the end sentinel
        end: usize,
        /// Content length in characters
        len: usize,
    },
}

impl EntryError {
    /// Check a half-open range against a content length.
    pub const fn check_range(start: usize, end: usize, len: usize) -> Result<(), Self> {
        if start <= end && end <= len {
            Ok(())
        } else {
            Err(Self::InvalidRange { start, end, len })
        }
    }
}
