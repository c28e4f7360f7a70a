//! Mip level extraction.
//!
//! After the header and key/value block, a KTX file holds one record per mip
//! level: a `u32` image size in the file's byte order, that many bytes of
//! image data, then filler bytes up to the next multiple of 4.

use std::io::{self, Read, Seek};

use ktxkit_common::{padding_for, remaining_len, ReadExt};

use crate::{Error, KtxHeader, LevelRecord, Result, TextureKind};

/// Mip level payloads split out of a KTX level stream.
///
/// Built once by [`decode`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    total_byte_length: u64,
    kind: TextureKind,
    levels: Vec<Vec<u8>>,
}

impl DecodedTexture {
    /// Bytes that remained in the source when decoding started.
    ///
    /// This covers everything after the cursor, including length prefixes,
    /// padding and any trailing data, so it is generally larger than
    /// [`payload_byte_length`](Self::payload_byte_length).
    #[inline]
    pub fn total_byte_length(&self) -> u64 {
        self.total_byte_length
    }

    /// Sum of the lengths of all level buffers.
    pub fn payload_byte_length(&self) -> u64 {
        self.levels.iter().map(|level| level.len() as u64).sum()
    }

    /// Shape of the texture.
    #[inline]
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// Level payloads in file order.
    #[inline]
    pub fn levels(&self) -> &[Vec<u8>] {
        &self.levels
    }

    /// Payload of a single level.
    #[inline]
    pub fn level(&self, index: usize) -> Option<&[u8]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Number of levels decoded.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Take ownership of the level payloads.
    pub fn into_levels(self) -> Vec<Vec<u8>> {
        self.levels
    }
}

/// Split the level records that start at the current position of `source`.
///
/// Reads `header.level_count()` records, so a declared count of 0 still
/// reads one. Length prefixes are decoded in the byte order the header
/// declares. The source is left just past the last record's padding.
///
/// Fails with [`Error::UnexpectedEndOfData`] when the stream ends inside any
/// record; nothing is returned for the levels read before that point.
pub fn decode<R: Read + Seek>(header: &KtxHeader, source: &mut R) -> Result<DecodedTexture> {
    let total_byte_length = remaining_len(source)?;
    let kind = header.kind();
    let level_count = header.level_count();
    let endianness = header.endianness;

    log::trace!(
        "decoding {} level(s) of {} texture, {} (swap: {})",
        level_count,
        kind,
        endianness,
        endianness.needs_swap()
    );

    let mut levels = Vec::with_capacity(level_count.min(32) as usize);

    for level in 0..level_count {
        let image_size = source
            .read_u32_in(endianness)
            .map_err(truncated(level, LevelRecord::LengthPrefix))?;
        let data = source
            .read_vec(u64::from(image_size))
            .map_err(truncated(level, LevelRecord::Payload))?;

        let padding = padding_for(image_size);
        source
            .skip_bytes(u64::from(padding))
            .map_err(truncated(level, LevelRecord::Padding))?;

        log::debug!(
            "mip level {}: {} bytes, {} padding",
            level,
            image_size,
            padding
        );
        levels.push(data);
    }

    Ok(DecodedTexture {
        total_byte_length,
        kind,
        levels,
    })
}

/// Map a short read inside a level record to [`Error::UnexpectedEndOfData`].
fn truncated(level: u32, record: LevelRecord) -> impl FnOnce(io::Error) -> Error {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEndOfData { level, record }
        } else {
            Error::Io(err)
        }
    }
}
