use crate::{Bitmap, ImageError, PixelFormat};
use rayon::prelude::*;

/// An 8-bit RGB pixel.
///
/// `Bgr24` bitmaps store channels as B, G, R. The reorder to R, G, B happens
/// once, in [`Pixel::from_bgr`]; everything downstream sees RGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a pixel from the first three bytes of a stored `B, G, R` triple.
    #[inline]
    pub fn from_bgr(bytes: &[u8]) -> Self {
        Self {
            r: bytes[2],
            g: bytes[1],
            b: bytes[0],
        }
    }

    /// The stored byte order of this pixel.
    pub fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Channel values in output order (R, G, B) scaled to `[0.0, 1.0]`.
    #[inline]
    pub fn normalized(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// An immutable, randomly indexable copy of a bitmap's pixels.
///
/// Construction holds the bitmap's lock only while its bytes are copied out;
/// decoding runs afterwards on the rayon pool.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Snapshots `bitmap`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidImageFormat` if the bitmap is not `Bgr24`.
    pub fn new(bitmap: &Bitmap) -> Result<Self, ImageError> {
        bitmap.format().ensure_format(PixelFormat::Bgr24)?;

        let (bytes, width, height, stride) = {
            let bits = bitmap.lock_bits();
            (
                bits.bytes().to_vec(),
                bits.width(),
                bits.height(),
                bits.stride(),
            )
        };

        let pixels = (0..width * height)
            .into_par_iter()
            .map(|p| {
                let offset = (p / width) * stride + (p % width) * 3;
                Pixel::from_bgr(&bytes[offset..offset + 3])
            })
            .collect();

        log::debug!("snapshot {width}x{height} bitmap (stride {stride})");

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels in row-major order, index `x + y * width`.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// The pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Pixel {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of range for {}x{} buffer",
            self.width,
            self.height
        );
        self.pixels[x + y * self.width]
    }

    /// Row `y` as a slice of `width` pixels.
    #[inline]
    pub fn row(&self, y: usize) -> &[Pixel] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}
