//! Byte order handling.

/// Byte order of the multi-byte integers in a file.
///
/// KTX writers store the reference value `0x04030201` in their native order,
/// so reading those four bytes back tells which order the rest of the file
/// uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endianness {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl Endianness {
    /// Reference value written by the producer in its own byte order.
    pub const MARKER: u32 = 0x0403_0201;

    /// Byte order of the host this code runs on.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;
    /// Byte order of the host this code runs on.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;

    /// Detect the byte order from the four marker bytes as stored in the file.
    ///
    /// Returns `None` when the bytes are neither the reference value nor its
    /// byte-swapped form.
    pub fn from_marker_bytes(bytes: [u8; 4]) -> Option<Self> {
        match u32::from_le_bytes(bytes) {
            Self::MARKER => Some(Self::Little),
            m if m == Self::MARKER.swap_bytes() => Some(Self::Big),
            _ => None,
        }
    }

    /// Whether values in this byte order must be swapped to be read on the host.
    #[inline]
    pub fn needs_swap(self) -> bool {
        self != Self::NATIVE
    }

    /// Convert a value that was loaded in host order into its real value.
    #[inline]
    pub fn fix_u32(self, value: u32) -> u32 {
        if self.needs_swap() {
            value.swap_bytes()
        } else {
            value
        }
    }

    /// Decode four bytes stored in this byte order.
    #[inline]
    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}

impl std::fmt::Display for Endianness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Little => f.write_str("little-endian"),
            Self::Big => f.write_str("big-endian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_detection() {
        assert_eq!(
            Endianness::from_marker_bytes([0x01, 0x02, 0x03, 0x04]),
            Some(Endianness::Little)
        );
        assert_eq!(
            Endianness::from_marker_bytes([0x04, 0x03, 0x02, 0x01]),
            Some(Endianness::Big)
        );
        assert_eq!(Endianness::from_marker_bytes([0x01, 0x03, 0x02, 0x04]), None);
        assert_eq!(Endianness::from_marker_bytes([0; 4]), None);
    }

    #[test]
    fn test_swap_is_involution() {
        for value in [0u32, 4, 0x0403_0201, 0xDEAD_BEEF, u32::MAX] {
            assert_eq!(value.swap_bytes().swap_bytes(), value);

            let foreign = if Endianness::NATIVE == Endianness::Little {
                Endianness::Big
            } else {
                Endianness::Little
            };
            assert_eq!(foreign.fix_u32(foreign.fix_u32(value)), value);
            assert_eq!(Endianness::NATIVE.fix_u32(value), value);
        }
    }

    #[test]
    fn test_fix_matches_decoding() {
        let bytes = [0x00, 0x00, 0x00, 0x04];
        let host_loaded = u32::from_ne_bytes(bytes);

        assert_eq!(Endianness::Big.u32_from_bytes(bytes), 4);
        assert_eq!(Endianness::Big.fix_u32(host_loaded), 4);
        assert_eq!(Endianness::Little.u32_from_bytes(bytes), 0x0400_0000);
        assert_eq!(Endianness::Little.fix_u32(host_loaded), 0x0400_0000);
    }
}
