//! Common utilities for ktxkit.
//!
//! This crate provides the byte-level building blocks used by the texture crate:
//!
//! - [`BinaryReader`] - Zero-copy, byte-order aware reading from byte slices
//! - [`Endianness`] - Byte order declared by a file, and swapping against the host
//! - [`ReadExt`] - Length-prefixed reads and skips over `std::io::Read` streams

mod endian;
mod error;
mod reader;
mod stream;

pub use endian::Endianness;
pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use stream::{padding_for, remaining_len, ReadExt};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
