//! The owned draw buffer captures render into, plus stride math and the
//! legacy shape descriptor.

use xxhash_rust::xxh3::Xxh3;

use crate::buffer::format::PixelFormat;
use crate::foundation::error::{SceneshotError, SceneshotResult};
use crate::foundation::geometry::Area;

/// Row strides are padded up to this many bytes.
pub const STRIDE_ALIGN: usize = 4;

/// How the row stride of a new or reshaped buffer is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrideMode {
    /// Minimal row bytes for the width, padded to [`STRIDE_ALIGN`].
    Auto,
    /// Exact row bytes, no padding.
    Tight,
}

/// Plain descriptor of a pixel buffer's shape, without the pixel data.
///
/// This is the header handed back by the legacy raw-memory capture entry
/// point; downstream image consumers address the caller's memory through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row stride in bytes.
    pub stride: u32,
    /// Pixel encoding.
    pub format: PixelFormat,
    /// Total payload bytes (palette block plus `stride * height`).
    pub data_size: usize,
}

/// An owned, contiguous pixel store plus its shape header.
///
/// Invariants: `stride >= width * bits_per_pixel / 8` (rounded up for bit
/// formats), and `data.len() == palette_bytes + stride * height`. A buffer
/// constructed over a caller-supplied byte budget additionally carries a
/// capacity limit that [`PixelBuffer::reshape`] refuses to exceed.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
    data: Vec<u8>,
    capacity_limit: Option<usize>,
}

/// Minimal row bytes for `width` pixels of `format`, before alignment.
fn row_bytes(width: u32, format: PixelFormat) -> usize {
    ((width as usize) * (format.bits_per_pixel() as usize)).div_ceil(8)
}

fn stride_for(width: u32, format: PixelFormat, mode: StrideMode) -> u32 {
    let tight = row_bytes(width, format);
    let bytes = match mode {
        StrideMode::Auto => tight.div_ceil(STRIDE_ALIGN) * STRIDE_ALIGN,
        StrideMode::Tight => tight,
    };
    bytes as u32
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    ///
    /// Fails with [`SceneshotError::AllocationFailed`] on a degenerate size.
    pub fn alloc(
        width: u32,
        height: u32,
        format: PixelFormat,
        mode: StrideMode,
    ) -> SceneshotResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneshotError::allocation_failed(format!(
                "degenerate buffer size {width}x{height}"
            )));
        }
        let stride = stride_for(width, format, mode);
        let len = format.palette_bytes() + stride as usize * height as usize;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data: vec![0; len],
            capacity_limit: None,
        })
    }

    /// Build a 1x1 placeholder buffer bounded by a caller's byte budget.
    ///
    /// The capture pipeline reshapes it to the real snapshot size; the reshape
    /// fails when that size does not fit in `max_bytes`.
    pub fn with_capacity_limit(format: PixelFormat, max_bytes: usize) -> SceneshotResult<Self> {
        let mut buf = Self::alloc(1, 1, format, StrideMode::Tight)?;
        if buf.data.len() > max_bytes {
            return Err(SceneshotError::allocation_failed(format!(
                "capacity limit of {max_bytes} bytes cannot hold a single {format} pixel"
            )));
        }
        buf.capacity_limit = Some(max_bytes);
        Ok(buf)
    }

    /// Resize the buffer in place, keeping its color format.
    ///
    /// Storage is reused where possible. Fails with `SizeInvalid` on a
    /// degenerate size and with `AllocationFailed` when a capacity-limited
    /// buffer cannot hold the new shape.
    pub fn reshape(&mut self, width: u32, height: u32, mode: StrideMode) -> SceneshotResult<()> {
        if width == 0 || height == 0 {
            return Err(SceneshotError::SizeInvalid);
        }
        let stride = stride_for(width, self.format, mode);
        let len = self.format.palette_bytes() + stride as usize * height as usize;
        if let Some(limit) = self.capacity_limit
            && len > limit
        {
            return Err(SceneshotError::allocation_failed(format!(
                "reshape to {width}x{height} needs {len} bytes, capacity limit is {limit}"
            )));
        }
        self.data.resize(len, 0);
        self.width = width;
        self.height = height;
        self.stride = stride;
        Ok(())
    }

    /// Zero pixel bytes inside `area` (buffer-local coordinates), or the whole
    /// buffer including the palette block when `area` is `None`.
    ///
    /// For sub-byte formats the cleared span is widened to byte boundaries.
    pub fn clear(&mut self, area: Option<Area>) {
        let Some(area) = area else {
            self.data.fill(0);
            return;
        };
        let clip = area.intersect(Area::from_size(0, 0, self.width as i32, self.height as i32));
        if clip.is_empty() {
            return;
        }
        let bpp = self.format.bits_per_pixel() as usize;
        let palette = self.format.palette_bytes();
        let first = (clip.x1 as usize * bpp) / 8;
        let last = ((clip.x2 as usize + 1) * bpp).div_ceil(8);
        for y in clip.y1..=clip.y2 {
            let row = palette + y as usize * self.stride as usize;
            self.data[row + first..row + last].fill(0);
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Pixel encoding.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pixel payload, palette block first.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel payload, palette block first.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of row `y`, past the palette block.
    pub fn row_offset(&self, y: u32) -> usize {
        self.format.palette_bytes() + y as usize * self.stride as usize
    }

    /// Shape header for this buffer.
    pub fn descriptor(&self) -> ImageDescriptor {
        ImageDescriptor {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data_size: self.data.len(),
        }
    }

    /// Content identity: xxh3 over the shape header and every pixel byte.
    ///
    /// Two captures of an unchanged scene must produce equal fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Xxh3::new();
        h.update(&self.width.to_le_bytes());
        h.update(&self.height.to_le_bytes());
        h.update(&self.stride.to_le_bytes());
        h.update(&(self.format.bits_per_pixel()).to_le_bytes());
        h.update(&self.data);
        h.digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_respects_stride_alignment() {
        let buf = PixelBuffer::alloc(10, 4, PixelFormat::L8, StrideMode::Auto).unwrap();
        assert_eq!(buf.stride(), 12);
        assert_eq!(buf.data().len(), 12 * 4);

        let tight = PixelBuffer::alloc(10, 4, PixelFormat::L8, StrideMode::Tight).unwrap();
        assert_eq!(tight.stride(), 10);
    }

    #[test]
    fn alloc_accounts_for_palette_and_bit_width() {
        let buf = PixelBuffer::alloc(10, 2, PixelFormat::I1, StrideMode::Auto).unwrap();
        // 10 bits -> 2 bytes tight -> 4 aligned, plus an 8 byte palette.
        assert_eq!(buf.stride(), 4);
        assert_eq!(buf.data().len(), 8 + 4 * 2);
        assert_eq!(buf.row_offset(0), 8);
    }

    #[test]
    fn alloc_rejects_degenerate_size() {
        assert!(matches!(
            PixelBuffer::alloc(0, 5, PixelFormat::A8, StrideMode::Auto),
            Err(SceneshotError::AllocationFailed(_))
        ));
    }

    #[test]
    fn reshape_keeps_format_and_reuses_storage() {
        let mut buf = PixelBuffer::alloc(4, 4, PixelFormat::Argb8888, StrideMode::Auto).unwrap();
        buf.reshape(8, 2, StrideMode::Auto).unwrap();
        assert_eq!(buf.width(), 8);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.format(), PixelFormat::Argb8888);
        assert_eq!(buf.stride(), 32);

        assert!(matches!(
            buf.reshape(8, 0, StrideMode::Auto),
            Err(SceneshotError::SizeInvalid)
        ));
    }

    #[test]
    fn capacity_limit_bounds_reshape() {
        let mut buf = PixelBuffer::with_capacity_limit(PixelFormat::L8, 64).unwrap();
        assert_eq!((buf.width(), buf.height()), (1, 1));

        buf.reshape(8, 8, StrideMode::Tight).unwrap();
        assert_eq!(buf.stride(), 8);
        assert_eq!(buf.data().len(), 64);

        assert!(matches!(
            buf.reshape(9, 8, StrideMode::Tight),
            Err(SceneshotError::AllocationFailed(_))
        ));
    }

    #[test]
    fn clear_region_zeroes_only_covered_rows() {
        let mut buf = PixelBuffer::alloc(4, 3, PixelFormat::L8, StrideMode::Auto).unwrap();
        buf.data_mut().fill(0xAB);
        buf.clear(Some(Area::new(1, 1, 2, 1)));

        assert_eq!(buf.data()[buf.row_offset(0)], 0xAB);
        let row1 = buf.row_offset(1);
        assert_eq!(&buf.data()[row1..row1 + 4], &[0xAB, 0, 0, 0xAB]);
        assert_eq!(buf.data()[buf.row_offset(2)], 0xAB);
    }

    #[test]
    fn clear_none_wipes_everything() {
        let mut buf = PixelBuffer::alloc(4, 2, PixelFormat::I1, StrideMode::Auto).unwrap();
        buf.data_mut().fill(0xFF);
        buf.clear(None);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let mut a = PixelBuffer::alloc(4, 4, PixelFormat::A8, StrideMode::Auto).unwrap();
        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());

        a.data_mut()[0] = 1;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let buf = PixelBuffer::alloc(8, 8, PixelFormat::Rgb565, StrideMode::Auto).unwrap();
        let dsc = buf.descriptor();
        let json = serde_json::to_string(&dsc).unwrap();
        let back: ImageDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dsc);
    }
}
