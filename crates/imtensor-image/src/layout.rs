use crate::fast::to_tensor_fast;
use crate::{Bitmap, ImageError, PixelBuffer};
use imtensor_base::Tensor;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Dimension order of a 4-D image tensor. The batch dimension is always 1
/// and the channel order is always R, G, B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// `[1, 3, height, width]`, tag `13hw`.
    ChwHw,
    /// `[1, 3, width, height]`, tag `13wh`.
    ChwWh,
    /// `[1, height, width, 3]`, tag `1hw3`.
    Hwc,
    /// Same shape and values as [`Layout::ChwHw`], produced straight from the
    /// packed bytes without a [`PixelBuffer`]. Tag `fast13hw`.
    FastChw,
}

impl Layout {
    pub const ALL: [Layout; 4] = [Layout::ChwHw, Layout::ChwWh, Layout::Hwc, Layout::FastChw];

    /// Tensor shape for an image of the given size.
    pub fn shape(&self, width: usize, height: usize) -> [usize; 4] {
        match self {
            Layout::ChwHw | Layout::FastChw => [1, 3, height, width],
            Layout::ChwWh => [1, 3, width, height],
            Layout::Hwc => [1, height, width, 3],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::ChwHw => "13hw",
            Layout::ChwWh => "13wh",
            Layout::Hwc => "1hw3",
            Layout::FastChw => "fast13hw",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Layout::ALL
            .into_iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ImageError::UnknownLayout(tag.to_string()))
    }
}

/// Splits a 3-plane buffer into its R, G and B planes.
pub(crate) fn planes_mut(
    data: &mut [f32],
    plane: usize,
) -> (&mut [f32], &mut [f32], &mut [f32]) {
    let (r, rest) = data.split_at_mut(plane);
    let (g, b) = rest.split_at_mut(plane);
    (r, g, &mut b[..plane])
}

fn tensor(shape: [usize; 4], data: Vec<f32>) -> Tensor<f32> {
    debug_assert_eq!(shape.iter().product::<usize>(), data.len());
    Tensor {
        shape: shape.to_vec(),
        data,
    }
}

/// Converts to `[1, 3, height, width]`, one rayon task per image row.
pub fn to_tensor_chw_hw(buffer: &PixelBuffer) -> Tensor<f32> {
    let (width, height) = (buffer.width(), buffer.height());
    let plane = width * height;
    let mut data = vec![0.0f32; 3 * plane];

    let (r, g, b) = planes_mut(&mut data, plane);
    r.par_chunks_mut(width)
        .zip(g.par_chunks_mut(width))
        .zip(b.par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, ((r_row, g_row), b_row))| {
            for (x, pixel) in buffer.row(y).iter().enumerate() {
                let [rv, gv, bv] = pixel.normalized();
                r_row[x] = rv;
                g_row[x] = gv;
                b_row[x] = bv;
            }
        });

    tensor(Layout::ChwHw.shape(width, height), data)
}

/// Converts to `[1, 3, width, height]`.
///
/// Each rayon task owns one contiguous destination run, which here is one
/// source column.
pub fn to_tensor_chw_wh(buffer: &PixelBuffer) -> Tensor<f32> {
    let (width, height) = (buffer.width(), buffer.height());
    let plane = width * height;
    let mut data = vec![0.0f32; 3 * plane];

    let (r, g, b) = planes_mut(&mut data, plane);
    r.par_chunks_mut(height)
        .zip(g.par_chunks_mut(height))
        .zip(b.par_chunks_mut(height))
        .enumerate()
        .for_each(|(x, ((r_col, g_col), b_col))| {
            for y in 0..height {
                let [rv, gv, bv] = buffer.get_pixel(x, y).normalized();
                r_col[y] = rv;
                g_col[y] = gv;
                b_col[y] = bv;
            }
        });

    tensor(Layout::ChwWh.shape(width, height), data)
}

/// Converts to `[1, height, width, 3]` on the calling thread.
pub fn to_tensor_hwc(buffer: &PixelBuffer) -> Tensor<f32> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut data = vec![0.0f32; 3 * width * height];

    for y in 0..height {
        for x in 0..width {
            let offset = (y * width + x) * 3;
            data[offset..offset + 3].copy_from_slice(&buffer.get_pixel(x, y).normalized());
        }
    }

    tensor(Layout::Hwc.shape(width, height), data)
}

/// Converts `bitmap` to a tensor in the requested layout.
///
/// # Errors
///
/// Returns `ImageError::InvalidImageFormat` (general layouts) or
/// `ImageError::UnsupportedPixelFormat` (fast path) if the bitmap is not `Bgr24`.
pub fn to_tensor(bitmap: &Bitmap, layout: Layout) -> Result<Tensor<f32>, ImageError> {
    let tensor = match layout {
        Layout::FastChw => to_tensor_fast(bitmap)?,
        Layout::ChwHw => to_tensor_chw_hw(&PixelBuffer::new(bitmap)?),
        Layout::ChwWh => to_tensor_chw_wh(&PixelBuffer::new(bitmap)?),
        Layout::Hwc => to_tensor_hwc(&PixelBuffer::new(bitmap)?),
    };
    log::debug!("converted to {layout} tensor {:?}", tensor.shape);
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planes_mut_splits_evenly() {
        let mut data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let (r, g, b) = planes_mut(&mut data, 4);
        assert_eq!(r, &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(g, &[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(b, &[8.0, 9.0, 10.0, 11.0]);
    }
}
