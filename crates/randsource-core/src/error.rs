//! Error taxonomy for the entropy source lifecycle.
//!
//! Each lifecycle operation has its own error type so callers only match on
//! what that operation can actually report. [`ErrorKind`] gives every failure a
//! stable name, which lets monitoring tell the informational
//! [`ShutdownError::DeallocationFailure`] apart from real faults.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Stable classification of every failure this crate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The configured device could not be opened.
    InitFail,
    /// No entropy strategy was compiled in or configured.
    SourceUnavailable,
    /// The instance was already shut down or failed; build a new one.
    Retired,
    /// The requested byte count could not be produced.
    ReadFail,
    /// A read was attempted while the channel was not open.
    NotOpen,
    /// The destination buffer is shorter than the requested length.
    BadParam,
    /// Shutdown on a source that was never opened. Informational.
    DeallocFail,
}

impl ErrorKind {
    /// `true` only for kinds that do not indicate a real fault.
    pub fn is_informational(self) -> bool {
        matches!(self, Self::DeallocFail)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitFail => write!(f, "init_fail"),
            Self::SourceUnavailable => write!(f, "source_unavailable"),
            Self::Retired => write!(f, "retired"),
            Self::ReadFail => write!(f, "read_fail"),
            Self::NotOpen => write!(f, "not_open"),
            Self::BadParam => write!(f, "bad_param"),
            Self::DeallocFail => write!(f, "dealloc_fail"),
        }
    }
}

/// Failure of [`EntropySource::initialize`](crate::EntropySource::initialize).
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to open entropy device {}: {source}", .path.display())]
    InitializationFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no entropy source available")]
    SourceUnavailable,

    #[error("entropy source already shut down or failed; construct a new instance")]
    Retired,
}

impl InitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InitializationFailure { .. } => ErrorKind::InitFail,
            Self::SourceUnavailable => ErrorKind::SourceUnavailable,
            Self::Retired => ErrorKind::Retired,
        }
    }
}

/// Why a read could not produce the requested byte count.
#[derive(Debug, Error)]
pub enum ReadCause {
    /// The channel reported end of stream.
    #[error("entropy channel exhausted")]
    Exhausted,

    /// Short or interrupted reads used up the retry budget.
    #[error("gave up after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure of [`EntropySource::get_octet_string`](crate::EntropySource::get_octet_string).
///
/// The destination buffer must not be used after any of these.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("read {filled} of {requested} requested entropy bytes: {cause}")]
    ReadFailure {
        requested: usize,
        filled: usize,
        #[source]
        cause: ReadCause,
    },

    #[error("entropy channel is not open")]
    NotOpen,

    #[error("no entropy source available")]
    SourceUnavailable,

    #[error("destination holds {capacity} bytes but {requested} were requested")]
    BufferTooSmall { requested: usize, capacity: usize },
}

impl ReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReadFailure { .. } => ErrorKind::ReadFail,
            Self::NotOpen => ErrorKind::NotOpen,
            Self::SourceUnavailable => ErrorKind::SourceUnavailable,
            Self::BufferTooSmall { .. } => ErrorKind::BadParam,
        }
    }
}

/// Failure of [`EntropySource::shutdown`](crate::EntropySource::shutdown).
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Nothing was open, so nothing was released. Safe to ignore.
    #[error("entropy source was never opened; nothing to release")]
    DeallocationFailure,
}

impl ShutdownError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DeallocationFailure => ErrorKind::DeallocFail,
        }
    }

    pub fn is_informational(&self) -> bool {
        self.kind().is_informational()
    }
}

/// Any lifecycle failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),

    #[error("invalid read policy: {0}")]
    InvalidPolicy(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Init(e) => e.kind(),
            Self::Read(e) => e.kind(),
            Self::Shutdown(e) => e.kind(),
            Self::InvalidPolicy(_) => ErrorKind::BadParam,
        }
    }
}

/// Result type for lifecycle operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealloc_failure_is_the_only_informational_kind() {
        assert!(ShutdownError::DeallocationFailure.is_informational());
        assert!(!ErrorKind::ReadFail.is_informational());
        assert!(!ErrorKind::InitFail.is_informational());
        assert!(!ErrorKind::SourceUnavailable.is_informational());
    }

    #[test]
    fn init_failure_and_unavailable_are_distinct() {
        let open = InitError::InitializationFailure {
            path: PathBuf::from("/nonexistent"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(open.kind(), ErrorKind::InitFail);
        assert_eq!(InitError::SourceUnavailable.kind(), ErrorKind::SourceUnavailable);
        assert_ne!(open.kind(), InitError::SourceUnavailable.kind());
    }

    #[test]
    fn unified_error_keeps_kind() {
        let err: Error = ShutdownError::DeallocationFailure.into();
        assert_eq!(err.kind(), ErrorKind::DeallocFail);

        let err: Error = ReadError::NotOpen.into();
        assert_eq!(err.kind(), ErrorKind::NotOpen);
    }

    #[test]
    fn read_failure_message_reports_progress() {
        let err = ReadError::ReadFailure {
            requested: 32,
            filled: 7,
            cause: ReadCause::Exhausted,
        };
        let msg = err.to_string();
        assert!(msg.contains("7 of 32"), "unexpected message: {msg}");
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(ErrorKind::DeallocFail.to_string(), "dealloc_fail");
        assert_eq!(ErrorKind::SourceUnavailable.to_string(), "source_unavailable");
    }
}
