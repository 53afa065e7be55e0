use crate::bitmap::PixelFormat;
use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    /// The source cannot supply a 24-bit BGR buffer.
    InvalidImageFormat(PixelFormat),
    /// The fast path cannot interpret the source byte layout.
    UnsupportedPixelFormat(String),
    /// A zero width or height was requested.
    InvalidDimensions { width: u32, height: u32 },
    /// A layout tag that names no implemented conversion.
    UnknownLayout(String),
    /// The pixel buffer is shorter than stride * height.
    BufferSize { expected: usize, got: usize },
    Decode(String),
    Tensor(imtensor_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidImageFormat(format) => {
                write!(f, "invalid image format: expected Bgr24, got {format:?}")
            }
            ImageError::UnsupportedPixelFormat(msg) => write!(f, "unsupported pixel format: {msg}"),
            ImageError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            ImageError::UnknownLayout(tag) => write!(f, "unknown tensor layout: {tag:?}"),
            ImageError::BufferSize { expected, got } => {
                write!(f, "pixel buffer too small: expected {expected} bytes, got {got}")
            }
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<imtensor_base::TensorError> for ImageError {
    fn from(err: imtensor_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
