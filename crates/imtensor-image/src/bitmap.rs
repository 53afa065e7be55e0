use crate::ImageError;
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Byte layout of a packed pixel row.
///
/// Only [`PixelFormat::Bgr24`] can be turned into a tensor; the other
/// formats describe buffers that callers may hold but the converters reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel, stored as B, G, R.
    Bgr24,
    /// 4 bytes per pixel, stored as B, G, R, A.
    Bgra32,
    /// 1 byte per pixel.
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Bgr24 => 3,
            PixelFormat::Bgra32 => 4,
            PixelFormat::Gray8 => 1,
        }
    }

    pub fn ensure_format(&self, expected: PixelFormat) -> Result<(), ImageError> {
        if *self != expected {
            return Err(ImageError::InvalidImageFormat(*self));
        }
        Ok(())
    }
}

/// Row stride for newly allocated bitmaps: rows are padded to 4 bytes.
pub fn aligned_stride(width: u32, format: PixelFormat) -> usize {
    (width as usize * format.bytes_per_pixel() + 3) & !3
}

/// A packed raster image with a possibly padded row stride.
///
/// The pixel memory sits behind a reader/writer lock. Access goes through
/// [`Bitmap::lock_bits`] and [`Bitmap::lock_bits_mut`], whose guards release
/// the lock when dropped.
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: RwLock<Vec<u8>>,
}

impl Bitmap {
    /// A black `Bgr24` canvas with 4-byte aligned rows.
    pub fn new(width: u32, height: u32) -> Result<Self, ImageError> {
        let stride = aligned_stride(width, PixelFormat::Bgr24);
        let len = stride
            .checked_mul(height as usize)
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        Self::from_raw(width, height, stride, PixelFormat::Bgr24, vec![0; len])
    }

    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidDimensions` if either dimension is zero or
    /// the buffer size overflows `usize`, and `ImageError::BufferSize` if
    /// `stride` cannot hold a row or `data` cannot hold `height` rows.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        let row_bytes = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if stride < row_bytes {
            return Err(ImageError::BufferSize {
                expected: row_bytes,
                got: stride,
            });
        }
        let expected = stride
            .checked_mul(height as usize)
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if data.len() < expected {
            return Err(ImageError::BufferSize {
                expected,
                got: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            format,
            data: RwLock::new(data),
        })
    }

    /// Wraps tightly packed BGR bytes (`width * 3` bytes per row).
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                got: data.len(),
            });
        }
        Self::from_raw(width, height, width as usize * 3, PixelFormat::Bgr24, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Shared access to the pixel memory for the lifetime of the guard.
    pub fn lock_bits(&self) -> BitmapData<'_> {
        BitmapData {
            guard: self.data.read().unwrap_or_else(|e| e.into_inner()),
            width: self.width as usize,
            height: self.height as usize,
            stride: self.stride,
            row_bytes: self.width as usize * self.format.bytes_per_pixel(),
        }
    }

    /// Exclusive access to the pixel memory for the lifetime of the guard.
    pub fn lock_bits_mut(&self) -> BitmapDataMut<'_> {
        BitmapDataMut {
            guard: self.data.write().unwrap_or_else(|e| e.into_inner()),
            height: self.height as usize,
            stride: self.stride,
            row_bytes: self.width as usize * self.format.bytes_per_pixel(),
        }
    }

    /// Copies the pixel rows without stride padding.
    pub fn to_packed(&self) -> Vec<u8> {
        let bits = self.lock_bits();
        let mut packed = Vec::with_capacity(bits.row_bytes * bits.height);
        for y in 0..bits.height {
            packed.extend_from_slice(bits.row(y));
        }
        packed
    }

    /// Releases the bitmap, handing back its pixel memory.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clone for Bitmap {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: RwLock::new(self.lock_bits().guard.to_vec()),
        }
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .finish()
    }
}

/// Read guard over a bitmap's pixel memory.
pub struct BitmapData<'a> {
    guard: RwLockReadGuard<'a, Vec<u8>>,
    width: usize,
    height: usize,
    stride: usize,
    row_bytes: usize,
}

impl BitmapData<'_> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// All `stride * height` bytes, padding included.
    pub fn bytes(&self) -> &[u8] {
        &self.guard[..self.stride * self.height]
    }

    /// Pixel bytes of row `y`, padding excluded.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.guard[start..start + self.row_bytes]
    }
}

/// Write guard over a bitmap's pixel memory.
pub struct BitmapDataMut<'a> {
    guard: RwLockWriteGuard<'a, Vec<u8>>,
    height: usize,
    stride: usize,
    row_bytes: usize,
}

impl BitmapDataMut<'_> {
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let len = self.stride * self.height;
        &mut self.guard[..len]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.row_bytes;
        &mut self.guard[start..end]
    }
}
