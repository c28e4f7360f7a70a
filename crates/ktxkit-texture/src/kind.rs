//! Texture shape classification.

use std::fmt;

use crate::KtxHeader;

/// Structural variant of a texture, combined with mipmap presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextureKind {
    /// One-dimensional texture with a single level.
    OneD,
    /// One-dimensional texture with a mip chain.
    OneDMipmapped,
    /// Two-dimensional texture with a single level.
    TwoD,
    /// Two-dimensional texture with a mip chain.
    TwoDMipmapped,
    /// Volume texture with a single level.
    ThreeD,
    /// Volume texture with a mip chain.
    ThreeDMipmapped,
    /// Six-face cube map, mipmapped or not.
    CubeMap,
    /// Array of textures, any dimensionality, mipmapped or not.
    TextureArray,
    /// Shape not determined.
    #[default]
    Unknown,
}

/// Classify the shape of a texture from its header.
///
/// Array element and face counts of 0 or 1 mean "not an array" and "not a
/// cube map"; arrays take precedence over cube maps, which take precedence
/// over dimensionality. Depth and height of 0 or 1 likewise count as absent.
pub fn classify(header: &KtxHeader) -> TextureKind {
    let has_mipmaps = header.mipmap_level_count > 1;
    let present = |count: u32| count > 1;

    if present(header.array_element_count) {
        return TextureKind::TextureArray;
    }
    if present(header.face_count) {
        return TextureKind::CubeMap;
    }

    match (
        present(header.pixel_depth),
        present(header.pixel_height),
        has_mipmaps,
    ) {
        (true, _, false) => TextureKind::ThreeD,
        (true, _, true) => TextureKind::ThreeDMipmapped,
        (false, true, false) => TextureKind::TwoD,
        (false, true, true) => TextureKind::TwoDMipmapped,
        (false, false, false) => TextureKind::OneD,
        (false, false, true) => TextureKind::OneDMipmapped,
    }
}

impl TextureKind {
    /// Classify a header. Same as [`classify`].
    #[inline]
    pub fn from_header(header: &KtxHeader) -> Self {
        classify(header)
    }

    /// Whether this kind is known to carry more than one mip level.
    ///
    /// Cube maps and arrays do not record mipmap presence in their kind.
    pub fn has_mipmaps(self) -> bool {
        matches!(
            self,
            Self::OneDMipmapped | Self::TwoDMipmapped | Self::ThreeDMipmapped
        )
    }

    /// Number of dimensions, when the kind records it.
    pub fn dimensions(self) -> Option<u8> {
        match self {
            Self::OneD | Self::OneDMipmapped => Some(1),
            Self::TwoD | Self::TwoDMipmapped => Some(2),
            Self::ThreeD | Self::ThreeDMipmapped => Some(3),
            Self::CubeMap | Self::TextureArray | Self::Unknown => None,
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OneD => "1D",
            Self::OneDMipmapped => "1D (mipmapped)",
            Self::TwoD => "2D",
            Self::TwoDMipmapped => "2D (mipmapped)",
            Self::ThreeD => "3D",
            Self::ThreeDMipmapped => "3D (mipmapped)",
            Self::CubeMap => "cube map",
            Self::TextureArray => "texture array",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endianness;

    fn shape(arrays: u32, faces: u32, height: u32, depth: u32, mips: u32) -> KtxHeader {
        KtxHeader {
            endianness: Endianness::Little,
            gl_type: 0,
            gl_type_size: 1,
            gl_format: 0,
            gl_internal_format: 0,
            gl_base_internal_format: 0,
            pixel_width: 64,
            pixel_height: height,
            pixel_depth: depth,
            array_element_count: arrays,
            face_count: faces,
            mipmap_level_count: mips,
            bytes_of_key_value_data: 0,
        }
    }

    #[test]
    fn test_defaults_classify_as_one_d() {
        for arrays in [0, 1] {
            for faces in [0, 1] {
                for height in [0, 1] {
                    for depth in [0, 1] {
                        for mips in [0, 1] {
                            let header = shape(arrays, faces, height, depth, mips);
                            assert_eq!(classify(&header), TextureKind::OneD);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_dimensionality() {
        assert_eq!(classify(&shape(0, 1, 32, 0, 1)), TextureKind::TwoD);
        assert_eq!(classify(&shape(0, 1, 32, 0, 6)), TextureKind::TwoDMipmapped);
        assert_eq!(classify(&shape(0, 1, 32, 8, 1)), TextureKind::ThreeD);
        assert_eq!(classify(&shape(0, 1, 0, 8, 4)), TextureKind::ThreeDMipmapped);
        assert_eq!(classify(&shape(0, 1, 0, 0, 7)), TextureKind::OneDMipmapped);
    }

    #[test]
    fn test_array_and_cube_precedence() {
        assert_eq!(classify(&shape(4, 6, 32, 8, 3)), TextureKind::TextureArray);
        assert_eq!(classify(&shape(2, 1, 0, 0, 1)), TextureKind::TextureArray);
        assert_eq!(classify(&shape(0, 6, 32, 0, 3)), TextureKind::CubeMap);
        assert_eq!(classify(&shape(1, 6, 32, 8, 1)), TextureKind::CubeMap);
    }

    #[test]
    fn test_classify_never_unknown() {
        for arrays in [0, 1, 2] {
            for faces in [0, 1, 6] {
                for height in [0, 1, 9] {
                    for depth in [0, 1, 9] {
                        for mips in [0, 1, 2] {
                            let kind = classify(&shape(arrays, faces, height, depth, mips));
                            assert_ne!(kind, TextureKind::Unknown);
                            assert_eq!(kind.has_mipmaps(), kind.dimensions().is_some() && mips > 1);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(TextureKind::default(), TextureKind::Unknown);
        assert_eq!(TextureKind::ThreeDMipmapped.dimensions(), Some(3));
        assert_eq!(TextureKind::CubeMap.dimensions(), None);
        assert_eq!(TextureKind::TwoDMipmapped.to_string(), "2D (mipmapped)");
    }
}
