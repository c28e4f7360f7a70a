//! KTX texture container handling.
//!
//! A KTX (version 1.1) file is a 64-byte header, a block of key/value
//! metadata, then one length-prefixed, 4-byte padded record per mip level:
//!
//! ```text
//! u32           imageSize    (file byte order)
//! u8[imageSize] imageData
//! u8[pad]       padding      pad = (4 - imageSize % 4) % 4
//! ```
//!
//! This crate parses the header, classifies the texture's shape, and splits
//! the level records into owned byte buffers. Payload bytes are never
//! interpreted as pixels.
//!
//! # Example
//!
//! ```no_run
//! use ktxkit_texture::KtxFile;
//!
//! let file = KtxFile::open("path/to/texture.ktx")?;
//! println!("{} with {} levels", file.texture().kind(), file.texture().level_count());
//! for (i, level) in file.texture().levels().iter().enumerate() {
//!     std::fs::write(format!("level_{i}.bin"), level)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod file;
mod header;
mod kind;
mod levels;
mod metadata;

pub use error::{Error, LevelRecord, Result};
pub use file::{is_ktx, KtxFile};
pub use header::{KtxHeader, HEADER_SIZE, KTX_IDENTIFIER};
pub use kind::{classify, TextureKind};
pub use levels::{decode, DecodedTexture};
pub use metadata::{KeyValue, Metadata};

pub use ktxkit_common::Endianness;
