use crate::{Bitmap, ImageError, PixelFormat, aligned_stride};
use crates_image::RgbImage;

impl Bitmap {
    /// Copies an RGB image into a new `Bgr24` bitmap with 4-byte aligned rows.
    pub fn from_rgb_image(image: &RgbImage) -> Result<Self, ImageError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        let stride = aligned_stride(width, PixelFormat::Bgr24);
        let mut data = vec![0u8; stride * height as usize];

        for (y, src_row) in image.as_raw().chunks_exact(width as usize * 3).enumerate() {
            let dst_row = &mut data[y * stride..y * stride + width as usize * 3];
            for (dst, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
                dst.copy_from_slice(&[src[2], src[1], src[0]]);
            }
        }

        Self::from_raw(width, height, stride, PixelFormat::Bgr24, data)
    }

    /// Copies a `Bgr24` bitmap into an RGB image, dropping row padding.
    pub fn to_rgb_image(&self) -> Result<RgbImage, ImageError> {
        self.format().ensure_format(PixelFormat::Bgr24)?;

        let mut rgb = self.to_packed();
        for px in rgb.chunks_exact_mut(3) {
            px.swap(0, 2);
        }

        let got = rgb.len();
        RgbImage::from_raw(self.width(), self.height(), rgb).ok_or(ImageError::BufferSize {
            expected: self.width() as usize * self.height() as usize * 3,
            got,
        })
    }
}

fn decode_bitmap_inner(data: &[u8]) -> Result<Bitmap, ImageError> {
    let img = crates_image::load_from_memory(data)?;
    Bitmap::from_rgb_image(&img.to_rgb8())
}

/// Decodes an encoded image (format auto-detected) into a `Bgr24` bitmap.
///
/// Alpha is dropped and grayscale is expanded to three channels. The
/// CPU-bound decoding runs on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub async fn decode_bitmap(data: &[u8]) -> Result<Bitmap, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_bitmap_inner(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Blocking variant of [`decode_bitmap`].
pub fn decode_bitmap_blocking(data: &[u8]) -> Result<Bitmap, ImageError> {
    decode_bitmap_inner(data)
}
