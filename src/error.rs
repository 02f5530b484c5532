//! Error types for archive navigation.

use std::io;

use thiserror::Error;

/// The first structural violation found while validating an archive.
///
/// Headers are checked field by field in the order magic, version, checksum, and validation
/// stops at the first failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("header has an invalid magic value")]
    InvalidMagic,

    #[error("header has an invalid version value")]
    InvalidVersion,

    /// Checksum mismatch, or the archive could not be scanned at all.
    #[error("header has an invalid checksum: {0}")]
    InvalidChecksum(ChecksumFailure),
}

/// Why a header was reported as [`ValidationError::InvalidChecksum`].
#[derive(Debug, Error)]
pub enum ChecksumFailure {
    #[error("expected {expected}, computed {computed}")]
    Mismatch {
        /// The checksum value stored in the header.
        expected: u64,
        /// The checksum computed from the header bytes.
        computed: u64,
    },

    #[error("I/O error while scanning: {0}")]
    Io(#[source] io::Error),
}

impl ValidationError {
    /// Numeric code of the failure: -1 for magic, -2 for version, -3 for checksum.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            ValidationError::InvalidMagic => -1,
            ValidationError::InvalidVersion => -2,
            ValidationError::InvalidChecksum(_) => -3,
        }
    }
}

impl From<io::Error> for ValidationError {
    fn from(err: io::Error) -> Self {
        ValidationError::InvalidChecksum(ChecksumFailure::Io(err))
    }
}

/// Errors from resolving, listing and reading entries.
#[derive(Debug, Error)]
pub enum Error {
    /// No entry at the path, or it has the wrong type for the operation.
    #[error("no such entry")]
    NotFound,

    #[error("offset {offset} is beyond the end of the {size} byte entry")]
    OffsetOutOfRange { offset: u64, size: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Numeric code of the failure: -1 for a missing entry, -2 for a bad offset.
    ///
    /// I/O failures share the code of a missing entry.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Error::NotFound | Error::Io(_) => -1,
            Error::OffsetOutOfRange { .. } => -2,
        }
    }
}

/// Result type for navigation operations.
pub type Result<T> = std::result::Result<T, Error>;
