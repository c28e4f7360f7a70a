//! KTX header structures.

use std::io::Read;

use ktxkit_common::{BinaryReader, Endianness};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result, TextureKind};

/// The 12 bytes every KTX 1.1 file starts with (`«KTX 11»\r\n\x1A\n`).
pub const KTX_IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Size of the fixed header, identifier included.
pub const HEADER_SIZE: usize = 64;

/// Header fields following the identifier and endianness marker, as stored.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
struct RawFields {
    gl_type: u32,
    gl_type_size: u32,
    gl_format: u32,
    gl_internal_format: u32,
    gl_base_internal_format: u32,
    pixel_width: u32,
    pixel_height: u32,
    pixel_depth: u32,
    number_of_array_elements: u32,
    number_of_faces: u32,
    number_of_mipmap_levels: u32,
    bytes_of_key_value_data: u32,
}

/// Decoded KTX file header.
///
/// All counts are already corrected to host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KtxHeader {
    /// Byte order the file was written in.
    pub endianness: Endianness,
    /// OpenGL data type, 0 for compressed textures.
    pub gl_type: u32,
    /// Size in bytes of `gl_type`, used for endianness conversion of pixel data.
    pub gl_type_size: u32,
    /// OpenGL pixel format, 0 for compressed textures.
    pub gl_format: u32,
    /// OpenGL internal format.
    pub gl_internal_format: u32,
    /// OpenGL base internal format.
    pub gl_base_internal_format: u32,
    /// Width of the base level in pixels.
    pub pixel_width: u32,
    /// Height of the base level in pixels, 0 for 1D textures.
    pub pixel_height: u32,
    /// Depth of the base level in pixels, 0 for non-3D textures.
    pub pixel_depth: u32,
    /// Number of array elements, 0 when not an array texture.
    pub array_element_count: u32,
    /// Number of cube map faces, 1 when not a cube map.
    pub face_count: u32,
    /// Declared number of mip levels, 0 asks the loader to generate them.
    pub mipmap_level_count: u32,
    /// Size of the key/value block that follows the header.
    pub bytes_of_key_value_data: u32,
}

impl KtxHeader {
    /// Parse a header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader {
                needed: HEADER_SIZE,
                available: data.len(),
            });
        }

        let mut reader = BinaryReader::new(data);

        let identifier: [u8; 12] = reader.read_array()?;
        if identifier != KTX_IDENTIFIER {
            return Err(Error::InvalidIdentifier(identifier));
        }

        let marker: [u8; 4] = reader.read_array()?;
        let endianness = Endianness::from_marker_bytes(marker)
            .ok_or(Error::InvalidEndianness(u32::from_le_bytes(marker)))?;

        let raw: RawFields = reader.read_struct()?;
        let fix = |value: u32| endianness.fix_u32(value);

        Ok(Self {
            endianness,
            gl_type: fix(raw.gl_type),
            gl_type_size: fix(raw.gl_type_size),
            gl_format: fix(raw.gl_format),
            gl_internal_format: fix(raw.gl_internal_format),
            gl_base_internal_format: fix(raw.gl_base_internal_format),
            pixel_width: fix(raw.pixel_width),
            pixel_height: fix(raw.pixel_height),
            pixel_depth: fix(raw.pixel_depth),
            array_element_count: fix(raw.number_of_array_elements),
            face_count: fix(raw.number_of_faces),
            mipmap_level_count: fix(raw.number_of_mipmap_levels),
            bytes_of_key_value_data: fix(raw.bytes_of_key_value_data),
        })
    }

    /// Read and parse a header from a stream, consuming exactly
    /// [`HEADER_SIZE`] bytes on success.
    pub fn read_from<R: Read>(source: &mut R) -> Result<Self> {
        let mut data = Vec::with_capacity(HEADER_SIZE);
        source.take(HEADER_SIZE as u64).read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Number of level records that follow the metadata block.
    ///
    /// A declared count of 0 still stores exactly one level.
    #[inline]
    pub fn level_count(&self) -> u32 {
        self.mipmap_level_count.max(1)
    }

    /// Shape of the texture described by this header.
    #[inline]
    pub fn kind(&self) -> TextureKind {
        TextureKind::from_header(self)
    }

    /// Whether the texture stores compressed data (`glType == 0`).
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.gl_type == 0
    }

    /// Pixel extent `(width, height, depth)` of a mip level.
    ///
    /// Each non-zero dimension halves per level, never dropping below 1;
    /// dimensions declared as 0 stay 0.
    pub fn level_extent(&self, level: u32) -> (u32, u32, u32) {
        let shrink = |dim: u32| {
            if dim == 0 {
                0
            } else {
                dim.checked_shr(level).unwrap_or(0).max(1)
            }
        };
        (
            shrink(self.pixel_width),
            shrink(self.pixel_height),
            shrink(self.pixel_depth),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a header in the given byte order.
    pub(crate) fn header_bytes(endianness: Endianness, fields: [u32; 12]) -> Vec<u8> {
        let mut data = KTX_IDENTIFIER.to_vec();
        let put = |data: &mut Vec<u8>, value: u32| match endianness {
            Endianness::Little => data.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => data.extend_from_slice(&value.to_be_bytes()),
        };
        put(&mut data, Endianness::MARKER);
        for field in fields {
            put(&mut data, field);
        }
        data
    }

    // glType, glTypeSize, glFormat, glInternalFormat, glBaseInternalFormat,
    // width, height, depth, arrays, faces, mips, kv bytes
    const RGBA_2D: [u32; 12] = [0x1401, 1, 0x1908, 0x8058, 0x1908, 16, 8, 0, 0, 1, 5, 0];

    #[test]
    fn test_parse_little_endian() {
        let data = header_bytes(Endianness::Little, RGBA_2D);
        assert_eq!(data.len(), HEADER_SIZE);

        let header = KtxHeader::parse(&data).unwrap();
        assert_eq!(header.endianness, Endianness::Little);
        assert_eq!(header.gl_type, 0x1401);
        assert_eq!(header.gl_internal_format, 0x8058);
        assert_eq!(header.pixel_width, 16);
        assert_eq!(header.pixel_height, 8);
        assert_eq!(header.face_count, 1);
        assert_eq!(header.mipmap_level_count, 5);
        assert!(!header.is_compressed());
        assert_eq!(header.kind(), TextureKind::TwoDMipmapped);
    }

    #[test]
    fn test_parse_big_endian_matches_little() {
        let little = KtxHeader::parse(&header_bytes(Endianness::Little, RGBA_2D)).unwrap();
        let big = KtxHeader::parse(&header_bytes(Endianness::Big, RGBA_2D)).unwrap();

        assert_eq!(big.endianness, Endianness::Big);
        assert_eq!(
            KtxHeader {
                endianness: Endianness::Little,
                ..big
            },
            little
        );
    }

    #[test]
    fn test_invalid_identifier() {
        let mut data = header_bytes(Endianness::Little, RGBA_2D);
        data[5] = b'2';

        assert!(matches!(
            KtxHeader::parse(&data),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_invalid_endianness() {
        let mut data = header_bytes(Endianness::Little, RGBA_2D);
        data[12..16].copy_from_slice(&[0x02, 0x01, 0x04, 0x03]);

        assert!(matches!(
            KtxHeader::parse(&data),
            Err(Error::InvalidEndianness(0x0304_0102))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let data = header_bytes(Endianness::Little, RGBA_2D);
        let mut stream = &data[..40];

        assert!(matches!(
            KtxHeader::read_from(&mut stream),
            Err(Error::TruncatedHeader {
                needed: HEADER_SIZE,
                available: 40
            })
        ));
    }

    #[test]
    fn test_read_from_consumes_header_only() {
        let mut data = header_bytes(Endianness::Little, RGBA_2D);
        data.extend_from_slice(&[0xEE; 8]);
        let mut stream = &data[..];

        KtxHeader::read_from(&mut stream).unwrap();
        assert_eq!(stream, &[0xEEu8; 8][..]);
    }

    #[test]
    fn test_level_count_and_extent() {
        let mut header = KtxHeader::parse(&header_bytes(Endianness::Little, RGBA_2D)).unwrap();

        assert_eq!(header.level_count(), 5);
        assert_eq!(header.level_extent(0), (16, 8, 0));
        assert_eq!(header.level_extent(3), (2, 1, 0));
        assert_eq!(header.level_extent(4), (1, 1, 0));
        assert_eq!(header.level_extent(40), (1, 1, 0));

        header.mipmap_level_count = 0;
        assert_eq!(header.level_count(), 1);
    }
}
