#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl Size<u32> {
    /// Pixel size of the surface at `scale`, at least one pixel each way.
    pub fn scaled(&self, scale: f64) -> Size<i32> {
        Size {
            width: ((self.width as f64 * scale).round() as i32).max(1),
            height: ((self.height as f64 * scale).round() as i32).max(1),
        }
    }
}
