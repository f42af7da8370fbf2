//! Pixel encodings and the snapshot support gate.

use std::fmt;

/// Pixel encodings the rendering engine knows about.
///
/// Only a subset of these can be targeted directly by snapshot capture; see
/// [`PixelFormat::snapshot_supported`]. Indexed formats store an ARGB8888
/// palette in front of the pixel rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// 1-bit indexed, 2-entry palette.
    I1,
    /// 2-bit indexed, 4-entry palette.
    I2,
    /// 4-bit indexed, 16-entry palette.
    I4,
    /// 8-bit indexed, 256-entry palette.
    I8,
    /// 1-bit alpha mask.
    A1,
    /// 2-bit alpha mask.
    A2,
    /// 4-bit alpha mask.
    A4,
    /// 8-bit alpha mask.
    A8,
    /// 8-bit luminance.
    L8,
    /// Packed 2-2-2-2 ARGB.
    Argb2222,
    /// 16-bit 5-6-5 RGB.
    Rgb565,
    /// 16-bit 4-4-4-4 ARGB.
    Argb4444,
    /// 16-bit 1-5-5-5 ARGB.
    Argb1555,
    /// RGB565 pixels followed by a separate 8-bit alpha plane.
    Rgb565A8,
    /// 24-bit RGB.
    Rgb888,
    /// 24-bit RGB565-compatible layout with an 8-bit alpha byte.
    Argb8565,
    /// 32-bit RGB with padding byte.
    Xrgb8888,
    /// 32-bit ARGB.
    Argb8888,
    /// Planar YUV 4:2:0.
    Nv12,
}

impl PixelFormat {
    /// Storage cost of one pixel in bits.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::I1 | Self::A1 => 1,
            Self::I2 | Self::A2 => 2,
            Self::I4 | Self::A4 => 4,
            Self::I8 | Self::A8 | Self::L8 | Self::Argb2222 => 8,
            Self::Nv12 => 12,
            Self::Rgb565 | Self::Argb4444 | Self::Argb1555 => 16,
            Self::Rgb888 | Self::Argb8565 | Self::Rgb565A8 => 24,
            Self::Xrgb8888 | Self::Argb8888 => 32,
        }
    }

    /// Bytes occupied by the leading palette block, zero for non-indexed
    /// formats. Palette entries are ARGB8888.
    pub fn palette_bytes(self) -> usize {
        match self {
            Self::I1 => 2 * 4,
            Self::I2 => 4 * 4,
            Self::I4 => 16 * 4,
            Self::I8 => 256 * 4,
            _ => 0,
        }
    }

    /// Return `true` when snapshot capture can render into this format
    /// directly.
    ///
    /// Sub-byte alpha masks, wide indexed formats, dual-plane and YUV layouts
    /// need a conversion pass the capture pipeline does not perform.
    pub fn snapshot_supported(self) -> bool {
        matches!(
            self,
            Self::Rgb565
                | Self::Argb8565
                | Self::Rgb888
                | Self::Xrgb8888
                | Self::Argb8888
                | Self::A8
                | Self::L8
                | Self::I1
                | Self::Argb2222
                | Self::Argb4444
                | Self::Argb1555
        )
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_per_pixel_matches_layouts() {
        assert_eq!(PixelFormat::I1.bits_per_pixel(), 1);
        assert_eq!(PixelFormat::A8.bits_per_pixel(), 8);
        assert_eq!(PixelFormat::Rgb565.bits_per_pixel(), 16);
        assert_eq!(PixelFormat::Rgb888.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Argb8888.bits_per_pixel(), 32);
    }

    #[test]
    fn palette_only_on_indexed_formats() {
        assert_eq!(PixelFormat::I1.palette_bytes(), 8);
        assert_eq!(PixelFormat::I8.palette_bytes(), 1024);
        assert_eq!(PixelFormat::A8.palette_bytes(), 0);
        assert_eq!(PixelFormat::Argb8888.palette_bytes(), 0);
    }

    #[test]
    fn snapshot_support_gate() {
        for f in [
            PixelFormat::Rgb565,
            PixelFormat::Argb8565,
            PixelFormat::Rgb888,
            PixelFormat::Xrgb8888,
            PixelFormat::Argb8888,
            PixelFormat::A8,
            PixelFormat::L8,
            PixelFormat::I1,
            PixelFormat::Argb2222,
            PixelFormat::Argb4444,
            PixelFormat::Argb1555,
        ] {
            assert!(f.snapshot_supported(), "{f} should be capturable");
        }
        for f in [
            PixelFormat::I2,
            PixelFormat::I4,
            PixelFormat::I8,
            PixelFormat::A1,
            PixelFormat::A2,
            PixelFormat::A4,
            PixelFormat::Rgb565A8,
            PixelFormat::Nv12,
        ] {
            assert!(!f.snapshot_supported(), "{f} should be rejected");
        }
    }
}
