use crate::{Bitmap, ImageError, Layout, LetterboxInfo, Pixel, letterbox, resize_stretch, to_tensor};
use imtensor_base::Tensor;
use std::fmt;
use std::str::FromStr;

/// How the source is fitted to the model input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Preserve aspect ratio and pad.
    Letterbox,
    /// Scale each axis independently.
    Stretch,
    /// Convert at the source size.
    None,
}

impl ResizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeMode::Letterbox => "letterbox",
            ResizeMode::Stretch => "stretch",
            ResizeMode::None => "none",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letterbox" => Ok(ResizeMode::Letterbox),
            "stretch" => Ok(ResizeMode::Stretch),
            "none" => Ok(ResizeMode::None),
            other => Err(format!("unknown resize mode: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessConfig {
    width: u32,
    height: u32,
    layout: Layout,
    resize: ResizeMode,
    fill: Pixel,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            layout: Layout::FastChw,
            resize: ResizeMode::Letterbox,
            fill: Pixel::BLACK,
        }
    }
}

impl PreprocessConfig {
    /// Set the model input width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the model input height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the output tensor layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set how the source is fitted to the input size.
    pub fn with_resize(mut self, resize: ResizeMode) -> Self {
        self.resize = resize;
        self
    }

    /// Set the letterbox padding colour.
    pub fn with_fill(mut self, fill: Pixel) -> Self {
        self.fill = fill;
        self
    }

    // Getters
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn resize(&self) -> ResizeMode {
        self.resize
    }

    pub fn fill(&self) -> Pixel {
        self.fill
    }
}

/// A model-ready tensor.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub tensor: Tensor<f32>,
    /// Placement of the source in the input, for mapping results back.
    /// Only set for [`ResizeMode::Letterbox`].
    pub letterbox: Option<LetterboxInfo>,
}

/// Resizes `image` as configured and converts it to a tensor.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` for a zero input size and the
/// format errors of [`to_tensor`] for a non-`Bgr24` image.
pub fn preprocess(image: &Bitmap, config: &PreprocessConfig) -> Result<Preprocessed, ImageError> {
    let (tensor, letterbox) = match config.resize {
        ResizeMode::Letterbox => {
            let (canvas, info) = letterbox(image, config.width, config.height, config.fill)?;
            (to_tensor(&canvas, config.layout)?, Some(info))
        }
        ResizeMode::Stretch => {
            let canvas = resize_stretch(image, config.width, config.height)?;
            (to_tensor(&canvas, config.layout)?, None)
        }
        ResizeMode::None => (to_tensor(image, config.layout)?, None),
    };

    Ok(Preprocessed { tensor, letterbox })
}
