use crate::{
    colors::{self, Color},
    draw::offset_line::JoinOptions,
    image_format::ImageFormat,
    size::Size,
};

#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Logical size; the surface is `size * scale` pixels.
    pub size: Size<u32>,
    pub scale: f64,
    pub format: ImageFormat,
    pub background: Color,
    /// Logical pixels kept free around the fitted features.
    pub padding: f64,
    pub join_options: JoinOptions,
}

impl RenderRequest {
    pub fn new(size: Size<u32>, format: ImageFormat) -> Self {
        Self {
            size,
            scale: 1.0,
            format,
            background: colors::WHITE,
            padding: 16.0,
            join_options: JoinOptions::default(),
        }
    }
}
