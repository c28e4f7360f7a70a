//! Key/value metadata block.

use ktxkit_common::{padding_for, BinaryReader, Endianness};

use crate::{Error, Result};

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// UTF-8 key, without its terminating NUL.
    pub key: String,
    /// Raw value bytes. String values usually keep their trailing NUL.
    pub value: Vec<u8>,
}

/// Key/value pairs stored between the header and the first mip level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<KeyValue>,
}

impl Metadata {
    /// Parse a key/value block of exactly `bytesOfKeyValueData` bytes.
    ///
    /// Each record is a `u32` size, a NUL-terminated key followed by the
    /// value, then padding to a multiple of 4. Padding after the final record
    /// may be missing.
    pub fn parse(data: &[u8], endianness: Endianness) -> Result<Self> {
        let mut reader = BinaryReader::with_endianness(data, endianness);
        let mut entries = Vec::new();

        while !reader.is_empty() {
            let size = reader.read_u32().map_err(|_| {
                invalid(format!(
                    "truncated record size at offset {}",
                    reader.position()
                ))
            })?;
            let offset = reader.position();
            let record = reader.read_bytes(size as usize).map_err(|_| {
                invalid(format!(
                    "record of {} bytes at offset {} overruns block of {} bytes",
                    size,
                    offset,
                    data.len()
                ))
            })?;

            let mut record_reader = BinaryReader::new(record);
            let key = record_reader
                .read_cstring()
                .map_err(|e| invalid(format!("bad key at offset {}: {}", offset, e)))?
                .to_owned();
            let value = record_reader.remaining_bytes().to_vec();

            log::trace!("metadata {:?}: {} byte value", key, value.len());
            entries.push(KeyValue { key, value });

            let padding = (padding_for(size) as usize).min(reader.remaining());
            reader.skip(padding)?;
        }

        Ok(Self { entries })
    }

    /// Raw value of the first entry with this key.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_slice())
    }

    /// Value of the first entry with this key as UTF-8, without a trailing NUL.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let value = self.get(key)?;
        let value = value.strip_suffix(&[0]).unwrap_or(value);
        std::str::from_utf8(value).ok()
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block held no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidMetadata(message)
}
