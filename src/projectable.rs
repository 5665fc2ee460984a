use crate::{bounding_box::BoundingBox, drawable::Drawable, size::Size};
use geo::Coord;

#[derive(Debug, Clone, Copy)]
pub struct TileProjector {
    min_x: f64,
    min_y: f64,
    scale: f64,
    height: f64,
}

impl TileProjector {
    pub fn new(bbox: &BoundingBox, size: Size<u32>) -> Self {
        let scale_x = size.width as f64 / bbox.width();
        let scale_y = size.height as f64 / bbox.height();

        // keep aspect ratio; a degenerate axis takes the other one's scale
        let scale = match (scale_x.is_finite(), scale_y.is_finite()) {
            (true, true) => scale_x.min(scale_y),
            (true, false) => scale_x,
            (false, true) => scale_y,
            (false, false) => 1.0,
        };

        Self {
            min_x: bbox.min_x,
            min_y: bbox.min_y,
            scale,
            height: size.height as f64,
        }
    }

    /// Fits `bbox` into `size` leaving `padding` pixels on every side.
    pub fn fit(bbox: &BoundingBox, size: Size<u32>, padding: f64) -> Self {
        let inner = Size::new(
            (size.width as f64 - 2.0 * padding).max(1.0) as u32,
            (size.height as f64 - 2.0 * padding).max(1.0) as u32,
        );

        let mut projector = Self::new(bbox, inner);

        projector.min_x -= padding / projector.scale;
        projector.min_y -= padding / projector.scale;
        projector.height = size.height as f64;

        projector
    }

    #[inline]
    pub fn project_coord(&self, coord: &Coord) -> Coord {
        Coord {
            x: (coord.x - self.min_x) * self.scale,
            y: (coord.y - self.min_y).mul_add(-self.scale, self.height),
        }
    }
}

pub trait TileProjectable {
    fn project_to_tile(&self, tp: &TileProjector) -> Self;
}

impl TileProjectable for Drawable {
    fn project_to_tile(&self, tp: &TileProjector) -> Self {
        self.map_coords(|c| tp.project_coord(&c))
    }
}
