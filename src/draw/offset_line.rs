use crate::{
    bounding_box::BoundingBox,
    coord_buffer::{CoordBuffer, CoordRange},
};
use geo::Coord;
use thiserror::Error;

/// Miter length, in multiples of the offset, above which corners are bevelled.
pub const DEFAULT_MITER_LIMIT: f64 = 2.0;

/// Used when every segment of the source range has zero length.
const FALLBACK_NORMAL: Coord = Coord { x: 0.0, y: 1.0 };

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParallelWayError {
    #[error("coordinate buffer is empty")]
    EmptyBuffer,

    #[error("range {index}..={index} is a single point")]
    SinglePoint { index: usize },

    #[error("range {from}..={to} is reversed")]
    ReversedRange { from: usize, to: usize },

    #[error("range end {to} is out of bounds for {len} coordinates")]
    OutOfBounds { to: usize, len: usize },

    #[error("offset {0} is not finite")]
    NonFiniteOffset(f64),

    #[error("coordinate {index} is not finite")]
    NonFiniteCoord { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinOptions {
    /// Values below 1 behave as 1.
    pub miter_limit: f64,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            miter_limit: DEFAULT_MITER_LIMIT,
        }
    }
}

pub fn generate_parallel_way(
    buffer: &mut CoordBuffer,
    from: usize,
    to: usize,
    offset: f64,
) -> Result<CoordRange, ParallelWayError> {
    generate_parallel_way_with(buffer, from, to, offset, &JoinOptions::default())
}

/// Appends the polyline `from..=to` shifted by `offset` pixels along its
/// left normal `(-dy, dx)`; negative offsets shift to the right.
///
/// The returned range starts right after the current end of the buffer and
/// holds at least as many points as the source. On error nothing is
/// appended.
pub fn generate_parallel_way_with(
    buffer: &mut CoordBuffer,
    from: usize,
    to: usize,
    offset: f64,
    options: &JoinOptions,
) -> Result<CoordRange, ParallelWayError> {
    let _span = profile_span!("offset_line::generate_parallel_way");

    validate_range(buffer, from, to)?;

    if !offset.is_finite() {
        return Err(ParallelWayError::NonFiniteOffset(offset));
    }

    let mut bounds = BoundingBox::default();

    for index in from..=to {
        let coord = buffer.at(index);

        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(ParallelWayError::NonFiniteCoord { index });
        }

        bounds.extend_by_coord(coord);
    }

    let limit = bounds.buffered(offset.abs());

    let miter_limit = options.miter_limit.max(1.0);

    let tr_from = buffer.len();

    buffer.reserve(to - from + 1);

    // leading zero-length segments borrow the first real normal
    let mut normal = (from..to)
        .find_map(|i| segment_normal(buffer.at(i), buffer.at(i + 1)))
        .unwrap_or(FALLBACK_NORMAL);

    let start = buffer.at(from);

    buffer.push(displace(start, normal, offset));

    for i in from + 1..to {
        let vertex = buffer.at(i);

        let next = segment_normal(vertex, buffer.at(i + 1)).unwrap_or(normal);

        push_join(buffer, vertex, normal, next, offset, &limit, miter_limit);

        normal = next;
    }

    let end = buffer.at(to);

    buffer.push(displace(end, normal, offset));

    Ok(CoordRange::new(tr_from, buffer.len() - 1))
}

fn validate_range(buffer: &CoordBuffer, from: usize, to: usize) -> Result<(), ParallelWayError> {
    if buffer.is_empty() {
        return Err(ParallelWayError::EmptyBuffer);
    }

    if from == to {
        return Err(ParallelWayError::SinglePoint { index: from });
    }

    if from > to {
        return Err(ParallelWayError::ReversedRange { from, to });
    }

    if to >= buffer.len() {
        return Err(ParallelWayError::OutOfBounds {
            to,
            len: buffer.len(),
        });
    }

    Ok(())
}

/// Unit left normal of the segment, `None` for a zero-length one.
fn segment_normal(a: Coord, b: Coord) -> Option<Coord> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    let length = dx.hypot(dy);

    if length == 0.0 || !length.is_finite() {
        return None;
    }

    Some(Coord {
        x: -dy / length,
        y: dx / length,
    })
}

#[inline]
fn displace(coord: Coord, normal: Coord, offset: f64) -> Coord {
    coord + normal * offset
}

fn push_join(
    buffer: &mut CoordBuffer,
    vertex: Coord,
    n1: Coord,
    n2: Coord,
    offset: f64,
    limit: &BoundingBox,
    miter_limit: f64,
) {
    let denom = 1.0 + n1.x.mul_add(n2.x, n1.y * n2.y);

    // miter length / |offset| == sqrt(2 / denom)
    if denom * miter_limit * miter_limit >= 2.0 {
        // depends on |offset| only, so +offset and -offset stay mirrored
        let shift = (n1 + n2) * (offset.abs() / denom);

        let outer = vertex + shift;
        let inner = vertex - shift;

        if limit.contains(outer) && limit.contains(inner) {
            buffer.push(if offset < 0.0 { inner } else { outer });

            return;
        }
    }

    buffer.push(displace(vertex, n1, offset));
    buffer.push(displace(vertex, n2, offset));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrilateral() -> CoordBuffer {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(10.0, 0.0);
        buffer.push_coord(5.0, 1.0);
        buffer.push_coord(0.0, 0.0);

        buffer
    }

    fn coords(buffer: &CoordBuffer, range: CoordRange) -> Vec<Coord> {
        buffer.slice(range).expect("valid range").to_vec()
    }

    fn assert_close(a: Coord, b: Coord) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn empty_buffer_is_rejected() {
        let mut buffer = CoordBuffer::new();

        assert_eq!(
            generate_parallel_way(&mut buffer, 0, 1, -1.0),
            Err(ParallelWayError::EmptyBuffer)
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn invalid_ranges_are_rejected_without_appending() {
        let mut buffer = quadrilateral();

        assert_eq!(
            generate_parallel_way(&mut buffer, 0, 4, -1.0),
            Err(ParallelWayError::OutOfBounds { to: 4, len: 4 })
        );
        assert_eq!(
            generate_parallel_way(&mut buffer, 3, 3, -1.0),
            Err(ParallelWayError::SinglePoint { index: 3 })
        );
        assert_eq!(
            generate_parallel_way(&mut buffer, 2, 1, -1.0),
            Err(ParallelWayError::ReversedRange { from: 2, to: 1 })
        );
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut buffer = quadrilateral();

        assert!(matches!(
            generate_parallel_way(&mut buffer, 0, 3, f64::NAN),
            Err(ParallelWayError::NonFiniteOffset(_))
        ));

        buffer.push_coord(f64::INFINITY, 0.0);

        assert_eq!(
            generate_parallel_way(&mut buffer, 2, 4, 1.0),
            Err(ParallelWayError::NonFiniteCoord { index: 4 })
        );
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn quadrilateral_stays_within_offset_bounds() {
        let mut buffer = quadrilateral();

        let range = generate_parallel_way(&mut buffer, 0, 3, -1.0).unwrap();

        assert!(range.from > 3);
        assert!(range.to - range.from >= 3);

        let bbox = BoundingBox::from_coords(&coords(&buffer, range));

        assert!(bbox.min_x > -1.0);
        assert!(bbox.max_x <= 12.0);
        assert!(bbox.min_y >= -1.0);
        assert!(bbox.max_y < 3.0);

        let second = generate_parallel_way(&mut buffer, 0, 3, 1.0).unwrap();

        assert!(second.from > 7);
        assert!(second.from > range.to);
    }

    #[test]
    fn quadrilateral_sharp_corners_are_bevelled() {
        let mut buffer = quadrilateral();

        let range = generate_parallel_way(&mut buffer, 0, 3, -1.0).unwrap();

        // both interior corners get two points each
        assert_eq!(range.point_count(), 6);

        let derived = coords(&buffer, range);

        assert_close(derived[0], Coord { x: 0.0, y: -1.0 });
        assert_close(derived[1], Coord { x: 10.0, y: -1.0 });
    }

    #[test]
    fn right_angle_is_mitred() {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(10.0, 0.0);
        buffer.push_coord(10.0, 10.0);

        let left = generate_parallel_way(&mut buffer, 0, 2, 1.0).unwrap();

        assert_eq!(
            coords(&buffer, left),
            vec![
                Coord { x: 0.0, y: 1.0 },
                Coord { x: 9.0, y: 1.0 },
                Coord { x: 9.0, y: 10.0 },
            ]
        );

        let right = generate_parallel_way(&mut buffer, 0, 2, -1.0).unwrap();

        assert_eq!(
            coords(&buffer, right),
            vec![
                Coord { x: 0.0, y: -1.0 },
                Coord { x: 11.0, y: -1.0 },
                Coord { x: 11.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn collinear_points_keep_point_count() {
        let mut buffer = CoordBuffer::new();

        for x in 0..5 {
            buffer.push_coord(x as f64 * 3.0, 2.0);
        }

        let range = generate_parallel_way(&mut buffer, 0, 4, 2.5).unwrap();

        assert_eq!(range.point_count(), 5);

        for (i, coord) in coords(&buffer, range).into_iter().enumerate() {
            assert_close(
                coord,
                Coord {
                    x: i as f64 * 3.0,
                    y: 4.5,
                },
            );
        }
    }

    #[test]
    fn u_turn_is_bevelled() {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(10.0, 0.0);
        buffer.push_coord(0.0, 0.0);

        let range = generate_parallel_way(&mut buffer, 0, 2, 1.0).unwrap();

        let derived = coords(&buffer, range);

        assert_eq!(derived.len(), 4);
        assert_close(derived[1], Coord { x: 10.0, y: 1.0 });
        assert_close(derived[2], Coord { x: 10.0, y: -1.0 });
    }

    #[test]
    fn coincident_points_reuse_neighbouring_normal() {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(5.0, 0.0);
        buffer.push_coord(5.0, 0.0);
        buffer.push_coord(10.0, 0.0);

        let range = generate_parallel_way(&mut buffer, 0, 4, 1.0).unwrap();

        let derived = coords(&buffer, range);

        assert_eq!(derived.len(), 5);

        for (coord, x) in derived.iter().zip([0.0, 0.0, 5.0, 5.0, 10.0]) {
            assert_close(*coord, Coord { x, y: 1.0 });
        }
    }

    #[test]
    fn fully_degenerate_range_uses_fallback_normal() {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(3.0, 3.0);
        buffer.push_coord(3.0, 3.0);
        buffer.push_coord(3.0, 3.0);

        let range = generate_parallel_way(&mut buffer, 0, 2, -2.0).unwrap();

        assert_eq!(range.point_count(), 3);

        for coord in coords(&buffer, range) {
            assert_eq!(coord, Coord { x: 3.0, y: 1.0 });
        }
    }

    #[test]
    fn derived_range_can_be_offset_again() {
        let mut buffer = quadrilateral();

        let first = generate_parallel_way(&mut buffer, 0, 2, 1.0).unwrap();
        let second = generate_parallel_way(&mut buffer, first.from, first.to, 1.0).unwrap();

        assert_eq!(second.from, first.to + 1);
        assert!(second.point_count() >= first.point_count());
    }

    #[test]
    fn mirrored_offsets_straddle_the_source() {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(4.0, 3.0);
        buffer.push_coord(9.0, 3.0);
        buffer.push_coord(12.0, 7.0);

        let plus = generate_parallel_way(&mut buffer, 0, 3, 1.5).unwrap();
        let minus = generate_parallel_way(&mut buffer, 0, 3, -1.5).unwrap();

        assert_eq!(plus.point_count(), 4);
        assert_eq!(minus.point_count(), 4);

        for i in 0..4 {
            let a = buffer.at(plus.from + i);
            let b = buffer.at(minus.from + i);
            let source = buffer.at(i);

            assert_close((a + b) / 2.0, source);
        }
    }

    #[test]
    fn low_miter_limit_bevels_every_corner() {
        let mut buffer = CoordBuffer::new();

        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(10.0, 0.0);
        buffer.push_coord(10.0, 10.0);

        let range =
            generate_parallel_way_with(&mut buffer, 0, 2, 1.0, &JoinOptions { miter_limit: 1.0 })
                .unwrap();

        assert_eq!(range.point_count(), 4);
    }
}
