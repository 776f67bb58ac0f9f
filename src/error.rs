//! Crate-wide error type.
//!
//! Parser-level damage (CRC mismatch, truncation at end of stream) is handled
//! locally and silently by the reassemblers and never surfaces here; this enum
//! covers the conditions callers must react to.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input exhausted while scanning for a sync byte. Clean terminator.
    #[error("end of stream")]
    EndOfStream,

    /// A structure declared more bytes than its container can hold.
    #[error("truncated {what}: need {need} bytes, have {have}")]
    Truncated {
        what: &'static str,
        need: usize,
        have: usize,
    },

    /// An ARIB feature the interpreter does not implement. Aborts the
    /// current caption unit only; the stream position stays consistent.
    #[error("unsupported ARIB feature: {what} (0x{value:02X})")]
    UnsupportedFeature { what: &'static str, value: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unsupported(what: &'static str, value: u8) -> Self {
        Error::UnsupportedFeature { what, value }
    }

    /// True for errors that abort one caption unit but not the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFeature { .. } | Error::Truncated { .. }
        )
    }
}
