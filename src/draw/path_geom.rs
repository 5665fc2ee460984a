use crate::coord_buffer::{CoordBuffer, CoordRange};
use cairo::Context;
use geo::Coord;

pub fn path_coords(context: &Context, coords: &[Coord]) {
    for (i, p) in coords.iter().enumerate() {
        if i == 0 {
            context.move_to(p.x, p.y);
        } else {
            context.line_to(p.x, p.y);
        }
    }
}

/// Adds the points of `range` as a new sub-path. Returns false and adds
/// nothing if the range is not valid for `buffer`.
pub fn path_range(context: &Context, buffer: &CoordBuffer, range: CoordRange, close: bool) -> bool {
    let Some(coords) = buffer.slice(range) else {
        return false;
    };

    path_coords(context, coords);

    if close {
        context.close_path();
    }

    true
}
