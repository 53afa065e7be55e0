//! Image-to-tensor preprocessing for ONNX-style inference engines.
//!
//! A [`Bitmap`] (packed 24-bit BGR with a padded row stride) is optionally
//! resized with [`resize_with_letterbox`] or [`resize_stretch`] and then
//! converted by [`to_tensor`] into a `Tensor<f32>` whose values are the
//! channel bytes divided by 255, always in R, G, B order.
//!
//! Supported layouts are `[1, 3, H, W]`, `[1, 3, W, H]` and `[1, H, W, 3]`;
//! see [`Layout`]. The general converters go through a [`PixelBuffer`]
//! snapshot; [`to_tensor_fast`] reads the packed bytes directly.

pub mod bitmap;
pub mod decode;
pub mod error;
pub mod fast;
pub mod layout;
pub mod pixel;
pub mod preprocess;
pub mod resize;

pub use bitmap::{Bitmap, BitmapData, BitmapDataMut, PixelFormat, aligned_stride};
pub use decode::{decode_bitmap, decode_bitmap_blocking};
pub use error::ImageError;
pub use fast::to_tensor_fast;
pub use layout::{Layout, to_tensor, to_tensor_chw_hw, to_tensor_chw_wh, to_tensor_hwc};
pub use pixel::{Pixel, PixelBuffer};
pub use preprocess::{PreprocessConfig, Preprocessed, ResizeMode, preprocess};
pub use resize::{
    LetterboxInfo, letterbox, resize_stretch, resize_with_letterbox, resize_with_letterbox_fill,
};

pub use imtensor_base::Tensor;
