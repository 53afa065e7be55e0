//! Planar RGB conversion straight from packed bytes.
//!
//! Output is `[1, 3, height, width]` laid out as three contiguous planes
//! (`RRRR.. GGGG.. BBBB..`), bit-identical to
//! [`to_tensor_chw_hw`](crate::to_tensor_chw_hw) for the same bitmap.

use crate::layout::planes_mut;
use crate::{Bitmap, ImageError, Layout, PixelFormat};
use imtensor_base::Tensor;
use rayon::prelude::*;

/// Converts a `Bgr24` bitmap to a `[1, 3, height, width]` tensor.
///
/// Reads the pixel memory under the bitmap's shared lock, without an
/// intermediate copy. Writers are blocked for the whole conversion. Pixel `p` reads bytes at `(p / width) * stride + (p % width) * 3`
/// and writes R, G, B at offset `p` of the respective plane.
///
/// # Errors
///
/// Returns `ImageError::UnsupportedPixelFormat` if the bitmap is not `Bgr24`.
pub fn to_tensor_fast(bitmap: &Bitmap) -> Result<Tensor<f32>, ImageError> {
    if bitmap.format() != PixelFormat::Bgr24 {
        return Err(ImageError::UnsupportedPixelFormat(format!(
            "{:?} cannot be read as 24-bit BGR",
            bitmap.format()
        )));
    }

    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;
    let plane = width * height;
    let mut data = vec![0.0f32; 3 * plane];

    {
        let bits = bitmap.lock_bits();
        let stride = bits.stride();
        let bytes = bits.bytes();

        let (r, g, b) = planes_mut(&mut data, plane);
        r.par_iter_mut()
            .zip(g.par_iter_mut())
            .zip(b.par_iter_mut())
            .enumerate()
            .for_each(|(p, ((r, g), b))| {
                let offset = (p / width) * stride + (p % width) * 3;
                *r = bytes[offset + 2] as f32 / 255.0;
                *g = bytes[offset + 1] as f32 / 255.0;
                *b = bytes[offset] as f32 / 255.0;
            });
    }

    Ok(Tensor::new(Layout::FastChw.shape(width, height).to_vec(), data)?)
}
