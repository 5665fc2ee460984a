//! Indices stay valid until [`CoordBuffer::reset`], which keeps the
//! allocation.

use crate::draw::offset_line::{generate_parallel_way_with, JoinOptions, ParallelWayError};
use geo::Coord;

/// Inclusive range of indices into a [`CoordBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordRange {
    pub from: usize,
    pub to: usize,
}

impl CoordRange {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Number of points covered, zero for a reversed range.
    pub const fn point_count(&self) -> usize {
        if self.to < self.from {
            0
        } else {
            self.to - self.from + 1
        }
    }

    /// True for a range spanning at least two points.
    pub const fn is_polyline(&self) -> bool {
        self.from < self.to
    }
}

#[derive(Debug, Default, Clone)]
pub struct CoordBuffer {
    coords: Vec<Coord>,
}

impl CoordBuffer {
    pub const fn new() -> Self {
        Self { coords: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            coords: Vec::with_capacity(capacity),
        }
    }

    /// Appends a point and returns its index.
    pub fn push_coord(&mut self, x: f64, y: f64) -> usize {
        self.push(Coord { x, y })
    }

    pub fn push(&mut self, coord: Coord) -> usize {
        self.coords.push(coord);

        self.coords.len() - 1
    }

    /// Appends a whole feature; `None` if `coords` yields nothing.
    pub fn push_coords(&mut self, coords: impl IntoIterator<Item = Coord>) -> Option<CoordRange> {
        let from = self.coords.len();

        self.coords.extend(coords);

        if self.coords.len() == from {
            None
        } else {
            Some(CoordRange::new(from, self.coords.len() - 1))
        }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.coords.capacity()
    }

    /// # Panics
    ///
    /// Panics if `index` was not issued by this buffer since the last reset.
    pub fn at(&self, index: usize) -> Coord {
        self.coords[index]
    }

    pub fn get(&self, index: usize) -> Option<Coord> {
        self.coords.get(index).copied()
    }

    /// Points of `range`, `None` if it is reversed or out of bounds.
    pub fn slice(&self, range: CoordRange) -> Option<&[Coord]> {
        if range.from > range.to {
            return None;
        }

        self.coords.get(range.from..=range.to)
    }

    /// Forgets every point but keeps the allocation. All previously issued
    /// indices become invalid.
    pub fn reset(&mut self) {
        self.coords.clear();
    }

    /// Appends a copy of `from..=to` displaced by `offset` pixels, see
    /// [`generate_parallel_way_with`].
    pub fn generate_parallel_way(
        &mut self,
        from: usize,
        to: usize,
        offset: f64,
    ) -> Result<CoordRange, ParallelWayError> {
        generate_parallel_way_with(self, from, to, offset, &JoinOptions::default())
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.coords.reserve(additional);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut buffer = CoordBuffer::new();

        assert_eq!(buffer.push_coord(0.0, 0.0), 0);
        assert_eq!(buffer.push_coord(10.0, 0.0), 1);
        assert_eq!(buffer.push(Coord { x: 5.0, y: 1.0 }), 2);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.at(1), Coord { x: 10.0, y: 0.0 });
    }

    #[test]
    fn appending_keeps_earlier_points() {
        let mut buffer = CoordBuffer::with_capacity(1);
        let first = buffer.push_coord(1.0, 2.0);

        for i in 0..1000 {
            buffer.push_coord(i as f64, 0.0);
        }

        assert_eq!(buffer.at(first), Coord { x: 1.0, y: 2.0 });
    }

    #[test]
    fn reset_keeps_capacity() {
        let mut buffer = CoordBuffer::new();

        for i in 0..64 {
            buffer.push_coord(i as f64, i as f64);
        }

        let capacity = buffer.capacity();

        buffer.reset();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), capacity);
        assert_eq!(buffer.get(0), None);
        assert_eq!(buffer.push_coord(3.0, 4.0), 0);
    }

    #[test]
    fn push_coords_returns_range() {
        let mut buffer = CoordBuffer::new();
        buffer.push_coord(0.0, 0.0);

        let range = buffer
            .push_coords([Coord { x: 1.0, y: 1.0 }, Coord { x: 2.0, y: 2.0 }])
            .unwrap();

        assert_eq!(range, CoordRange::new(1, 2));
        assert_eq!(range.point_count(), 2);
        assert!(range.is_polyline());
        assert_eq!(buffer.push_coords(std::iter::empty()), None);
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let mut buffer = CoordBuffer::new();
        buffer.push_coord(0.0, 0.0);
        buffer.push_coord(1.0, 0.0);

        assert_eq!(buffer.slice(CoordRange::new(0, 1)).map(<[Coord]>::len), Some(2));
        assert!(buffer.slice(CoordRange::new(1, 0)).is_none());
        assert!(buffer.slice(CoordRange::new(0, 2)).is_none());
    }

    #[test]
    #[should_panic]
    fn at_out_of_range_panics() {
        CoordBuffer::new().at(0);
    }
}
