//! Error types for KTX handling.

use std::fmt;

use thiserror::Error;

/// Part of a mip level record that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRecord {
    /// The 4-byte `imageSize` prefix.
    LengthPrefix,
    /// The image bytes themselves.
    Payload,
    /// Alignment bytes after the image bytes.
    Padding,
}

impl fmt::Display for LevelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthPrefix => f.write_str("length prefix"),
            Self::Payload => f.write_str("payload"),
            Self::Padding => f.write_str("padding"),
        }
    }
}

/// Errors that can occur when reading KTX files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] ktxkit_common::Error),

    /// The file does not start with the KTX 1.1 identifier.
    #[error("invalid KTX identifier: {0:02X?}")]
    InvalidIdentifier([u8; 12]),

    /// The endianness field is neither the reference value nor its swapped form.
    #[error("invalid endianness marker: {0:#010X}")]
    InvalidEndianness(u32),

    /// Fewer bytes than a full header.
    #[error("truncated header: needed {needed} bytes but only {available} available")]
    TruncatedHeader { needed: usize, available: usize },

    /// The stream ended inside a mip level record.
    #[error("unexpected end of data in {record} of mip level {level}")]
    UnexpectedEndOfData { level: u32, record: LevelRecord },

    /// Malformed key/value metadata block.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}

/// Result type for KTX operations.
pub type Result<T> = std::result::Result<T, Error>;
