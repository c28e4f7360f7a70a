//! Helpers for reading length-prefixed records from `std::io` streams.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::Endianness;

/// Number of filler bytes that follow `len` bytes of data so the next record
/// starts on a 4-byte boundary.
#[inline]
pub const fn padding_for(len: u32) -> u32 {
    (4 - len % 4) % 4
}

/// Number of bytes between the current position of `source` and its end.
///
/// The position is restored before returning.
pub fn remaining_len<S: Seek + ?Sized>(source: &mut S) -> io::Result<u64> {
    let position = source.stream_position()?;
    let end = source.seek(SeekFrom::End(0))?;
    if end != position {
        source.seek(SeekFrom::Start(position))?;
    }
    Ok(end.saturating_sub(position))
}

/// Extension trait for reading binary records from streams.
///
/// Short reads surface as [`io::ErrorKind::UnexpectedEof`].
pub trait ReadExt: Read {
    /// Read a u32 stored in the given byte order.
    fn read_u32_in(&mut self, endianness: Endianness) -> io::Result<u32> {
        match endianness {
            Endianness::Little => self.read_u32::<LittleEndian>(),
            Endianness::Big => self.read_u32::<BigEndian>(),
        }
    }

    /// Read exactly `len` bytes into a new buffer.
    ///
    /// The buffer grows as data arrives, so a bogus length on a short stream
    /// fails without allocating the full amount up front.
    fn read_vec(&mut self, len: u64) -> io::Result<Vec<u8>>
    where
        Self: Sized,
    {
        let mut data = Vec::with_capacity(len.min(64 * 1024) as usize);
        let read = self.by_ref().take(len).read_to_end(&mut data)?;
        if (read as u64) < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("needed {} bytes but only {} available", len, read),
            ));
        }
        Ok(data)
    }

    /// Consume and discard exactly `count` bytes.
    fn skip_bytes(&mut self, count: u64) -> io::Result<()>
    where
        Self: Sized,
    {
        let skipped = io::copy(&mut self.by_ref().take(count), &mut io::sink())?;
        if skipped < count {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("needed to skip {} bytes but only {} available", count, skipped),
            ));
        }
        Ok(())
    }
}

impl<R: Read> ReadExt for R {}
