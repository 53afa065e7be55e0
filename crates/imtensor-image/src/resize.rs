use crate::{Bitmap, ImageError, Pixel, PixelFormat};
use rayon::prelude::*;

/// Placement of a letterboxed image inside its target canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Uniform scale applied to the source.
    pub scale: f32,
    pub scaled_width: u32,
    pub scaled_height: u32,
    /// Left padding in target pixels.
    pub pad_x: u32,
    /// Top padding in target pixels.
    pub pad_y: u32,
}

impl LetterboxInfo {
    /// Computes the letterbox placement of a `source_width x source_height`
    /// image inside a `target_width x target_height` canvas.
    ///
    /// The scale is `min(target_width / source_width, target_height / source_height)`.
    /// The limiting axis fills the target exactly and the other is
    /// `floor(source * scale)` computed in integers. The remaining space is split evenly with any odd pixel going to the
    /// right or bottom.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidDimensions` if any dimension is zero.
    pub fn compute(
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self, ImageError> {
        ensure_target(target_width, target_height)?;
        if source_width == 0 || source_height == 0 {
            return Err(ImageError::InvalidDimensions {
                width: source_width,
                height: source_height,
            });
        }

        let (sw, sh) = (source_width as u64, source_height as u64);
        let (tw, th) = (target_width as u64, target_height as u64);

        // tw / sw <= th / sh, compared without rounding
        let (scale, scaled_width, scaled_height) = if tw * sh <= th * sw {
            let height = (sh * tw / sw) as u32;
            (target_width as f32 / source_width as f32, target_width, height)
        } else {
            let width = (sw * th / sh) as u32;
            (target_height as f32 / source_height as f32, width, target_height)
        };

        Ok(Self {
            scale,
            scaled_width,
            scaled_height,
            pad_x: (target_width - scaled_width) / 2,
            pad_y: (target_height - scaled_height) / 2,
        })
    }

    /// Maps a point in the target canvas back to source image coordinates.
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.pad_x as f32) / self.scale,
            (y - self.pad_y as f32) / self.scale,
        )
    }
}

fn ensure_target(width: u32, height: u32) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Nearest source index for destination index `dst`, sampling at pixel centres.
#[inline]
fn nearest(dst: usize, dst_len: usize, src_len: usize) -> usize {
    ((2 * dst + 1) * src_len / (2 * dst_len)).min(src_len - 1)
}

fn canvas(width: u32, height: u32, fill: Pixel) -> Result<Bitmap, ImageError> {
    let canvas = Bitmap::new(width, height)?;
    if fill != Pixel::BLACK {
        let bgr = fill.to_bgr();
        let mut bits = canvas.lock_bits_mut();
        let stride = bits.stride();
        bits.bytes_mut().par_chunks_mut(stride).for_each(|row| {
            for px in row[..width as usize * 3].chunks_exact_mut(3) {
                px.copy_from_slice(&bgr);
            }
        });
    }
    Ok(canvas)
}

/// Draws the whole of `source` into the `width x height` rectangle at
/// (`left`, `top`) of `canvas` with nearest-neighbour sampling.
fn draw_nearest(source: &Bitmap, canvas: &Bitmap, left: usize, top: usize, width: usize, height: usize) {
    if width == 0 || height == 0 {
        return;
    }

    let src = source.lock_bits();
    let x_offsets: Vec<usize> = (0..width)
        .map(|dx| nearest(dx, width, src.width()) * 3)
        .collect();

    let mut dst = canvas.lock_bits_mut();
    let stride = dst.stride();
    dst.bytes_mut()[top * stride..(top + height) * stride]
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(dy, row)| {
            let src_row = src.row(nearest(dy, height, src.height()));
            let dst_row = &mut row[left * 3..(left + width) * 3];
            for (px, &sx) in dst_row.chunks_exact_mut(3).zip(&x_offsets) {
                px.copy_from_slice(&src_row[sx..sx + 3]);
            }
        });
}

/// Letterboxes `source` into a `target_width x target_height` canvas filled
/// with `fill`, returning the canvas and the placement used.
pub fn letterbox(
    source: &Bitmap,
    target_width: u32,
    target_height: u32,
    fill: Pixel,
) -> Result<(Bitmap, LetterboxInfo), ImageError> {
    let info = LetterboxInfo::compute(source.width(), source.height(), target_width, target_height)?;
    source.format().ensure_format(PixelFormat::Bgr24)?;

    if info.scaled_width == 0 || info.scaled_height == 0 {
        log::warn!(
            "{}x{} image vanishes when letterboxed into {target_width}x{target_height}",
            source.width(),
            source.height()
        );
    }

    let canvas = canvas(target_width, target_height, fill)?;
    draw_nearest(
        source,
        &canvas,
        info.pad_x as usize,
        info.pad_y as usize,
        info.scaled_width as usize,
        info.scaled_height as usize,
    );

    log::debug!(
        "letterboxed {}x{} -> {target_width}x{target_height} (scale {}, pad {}x{})",
        source.width(),
        source.height(),
        info.scale,
        info.pad_x,
        info.pad_y
    );

    Ok((canvas, info))
}

/// Aspect-preserving resize into a black `target_width x target_height` canvas.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if a target dimension is zero and
/// `ImageError::InvalidImageFormat` if `source` is not `Bgr24`.
pub fn resize_with_letterbox(
    source: &Bitmap,
    target_width: u32,
    target_height: u32,
) -> Result<Bitmap, ImageError> {
    resize_with_letterbox_fill(source, target_width, target_height, Pixel::BLACK)
}

/// Like [`resize_with_letterbox`], padding with `fill` instead of black.
pub fn resize_with_letterbox_fill(
    source: &Bitmap,
    target_width: u32,
    target_height: u32,
    fill: Pixel,
) -> Result<Bitmap, ImageError> {
    letterbox(source, target_width, target_height, fill).map(|(canvas, _)| canvas)
}

/// Resizes `source` to exactly `target_width x target_height`, ignoring aspect ratio.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if a target dimension is zero and
/// `ImageError::InvalidImageFormat` if `source` is not `Bgr24`.
pub fn resize_stretch(
    source: &Bitmap,
    target_width: u32,
    target_height: u32,
) -> Result<Bitmap, ImageError> {
    ensure_target(target_width, target_height)?;
    source.format().ensure_format(PixelFormat::Bgr24)?;

    let canvas = Bitmap::new(target_width, target_height)?;
    draw_nearest(
        source,
        &canvas,
        0,
        0,
        target_width as usize,
        target_height as usize,
    );

    log::debug!(
        "stretched {}x{} -> {target_width}x{target_height}",
        source.width(),
        source.height()
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_identity() {
        for i in 0..7 {
            assert_eq!(nearest(i, 7, 7), i);
        }
    }

    #[test]
    fn test_nearest_downscale_by_two() {
        let picked: Vec<usize> = (0..4).map(|i| nearest(i, 4, 8)).collect();
        assert_eq!(picked, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_nearest_upscale_by_two() {
        let picked: Vec<usize> = (0..6).map(|i| nearest(i, 6, 3)).collect();
        assert_eq!(picked, vec![0, 0, 1, 1, 2, 2]);
    }
}
