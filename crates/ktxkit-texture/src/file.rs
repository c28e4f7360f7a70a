//! Whole-file KTX reading.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::{decode, DecodedTexture, Error, KtxHeader, Metadata, Result, KTX_IDENTIFIER};

/// Check whether `data` starts with the KTX 1.1 identifier.
pub fn is_ktx(data: &[u8]) -> bool {
    data.starts_with(&KTX_IDENTIFIER)
}

/// A fully read KTX file: header, key/value metadata and mip level payloads.
#[derive(Debug, Clone)]
pub struct KtxFile {
    header: KtxHeader,
    metadata: Metadata,
    texture: DecodedTexture,
}

impl KtxFile {
    /// Open and read a KTX file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("opening KTX file {}", path.display());

        let mut reader = BufReader::new(File::open(path)?);
        Self::from_reader(&mut reader)
    }

    /// Parse a KTX file held in memory.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::from_reader(&mut Cursor::new(data))
    }

    /// Read a KTX file starting at the current position of `source`.
    ///
    /// On success the source is left just past the last mip level record.
    pub fn from_reader<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let header = KtxHeader::read_from(source)?;

        let kv_len = header.bytes_of_key_value_data as usize;
        let mut kv_data = Vec::with_capacity(kv_len.min(64 * 1024));
        let read = source
            .by_ref()
            .take(kv_len as u64)
            .read_to_end(&mut kv_data)?;
        if read < kv_len {
            return Err(Error::InvalidMetadata(format!(
                "key/value block declares {} bytes but only {} available",
                kv_len, read
            )));
        }
        let metadata = Metadata::parse(&kv_data, header.endianness)?;

        let texture = decode(&header, source)?;

        Ok(Self {
            header,
            metadata,
            texture,
        })
    }

    /// File header.
    pub fn header(&self) -> &KtxHeader {
        &self.header
    }

    /// Key/value metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Decoded mip levels.
    pub fn texture(&self) -> &DecodedTexture {
        &self.texture
    }

    /// Split into header, metadata and levels.
    pub fn into_parts(self) -> (KtxHeader, Metadata, DecodedTexture) {
        (self.header, self.metadata, self.texture)
    }
}
