use crate::coord_buffer::{CoordBuffer, CoordRange};
use bitflags::bitflags;
use geo::{Coord, LineString};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SegmentFlags: u16 {
        const BRIDGE = 1 << 0;
        const TUNNEL = 1 << 1;
        const ONEWAY = 1 << 2;
        const START_IS_JOINT = 1 << 3;
        const END_IS_JOINT = 1 << 4;
        const BUILDING = 1 << 5;
        const RESTRICTIONS = 1 << 6;
    }
}

impl SegmentFlags {
    /// Parses a lowercase flag name as used in styles and GeoJSON properties.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bridge" => Self::BRIDGE,
            "tunnel" => Self::TUNNEL,
            "oneway" => Self::ONEWAY,
            "start_is_joint" => Self::START_IS_JOINT,
            "end_is_joint" => Self::END_IS_JOINT,
            "building" => Self::BUILDING,
            "restrictions" => Self::RESTRICTIONS,
            _ => return None,
        })
    }
}

/// What the style needs to know about a feature besides its geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentAttributes {
    /// Feature type, e.g. `highway=primary`.
    pub kind: String,
    pub flags: SegmentFlags,
    pub name: Option<String>,
    pub reference: Option<String>,
    pub layer: i8,
    pub width: Option<u8>,
}

impl SegmentAttributes {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_flags(mut self, flags: SegmentFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub const fn is_bridge(&self) -> bool {
        self.flags.contains(SegmentFlags::BRIDGE)
    }

    pub const fn is_tunnel(&self) -> bool {
        self.flags.contains(SegmentFlags::TUNNEL)
    }

    pub const fn is_oneway(&self) -> bool {
        self.flags.contains(SegmentFlags::ONEWAY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Way {
        line: LineString,
        attributes: SegmentAttributes,
    },
    /// A single ring; the last coordinate repeats the first.
    Area {
        ring: LineString,
        attributes: SegmentAttributes,
    },
    Node {
        coord: Coord,
        attributes: SegmentAttributes,
    },
}

impl Drawable {
    pub fn coords(&self) -> &[Coord] {
        match self {
            Self::Way { line, .. } => &line.0,
            Self::Area { ring, .. } => &ring.0,
            Self::Node { coord, .. } => std::slice::from_ref(coord),
        }
    }

    pub const fn attributes(&self) -> &SegmentAttributes {
        match self {
            Self::Way { attributes, .. }
            | Self::Area { attributes, .. }
            | Self::Node { attributes, .. } => attributes,
        }
    }

    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Area { .. })
    }

    /// Sort key for painting: lower layers first.
    pub fn layer(&self) -> i8 {
        self.attributes().layer
    }

    pub fn push_to(&self, buffer: &mut CoordBuffer) -> Option<CoordRange> {
        buffer.push_coords(self.coords().iter().copied())
    }

    pub fn map_coords(&self, f: impl Fn(Coord) -> Coord) -> Self {
        match self {
            Self::Way { line, attributes } => Self::Way {
                line: line.0.iter().map(|c| f(*c)).collect(),
                attributes: attributes.clone(),
            },
            Self::Area { ring, attributes } => Self::Area {
                ring: ring.0.iter().map(|c| f(*c)).collect(),
                attributes: attributes.clone(),
            },
            Self::Node { coord, attributes } => Self::Node {
                coord: f(*coord),
                attributes: attributes.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_are_uniform_across_variants() {
        let way = Drawable::Way {
            line: LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]),
            attributes: SegmentAttributes::new("highway=path"),
        };

        let node = Drawable::Node {
            coord: Coord { x: 2.0, y: 3.0 },
            attributes: SegmentAttributes::new("natural=peak"),
        };

        assert_eq!(way.coords().len(), 2);
        assert_eq!(node.coords(), &[Coord { x: 2.0, y: 3.0 }]);
        assert!(!way.is_closed());

        let mut buffer = CoordBuffer::new();

        assert_eq!(way.push_to(&mut buffer), Some(CoordRange::new(0, 1)));
        assert_eq!(node.push_to(&mut buffer), Some(CoordRange::new(2, 2)));
    }

    #[test]
    fn flags_parse_by_name() {
        assert_eq!(SegmentFlags::from_name("bridge"), Some(SegmentFlags::BRIDGE));
        assert_eq!(SegmentFlags::from_name("ford"), None);

        let attributes = SegmentAttributes::new("highway=primary")
            .with_flags(SegmentFlags::BRIDGE | SegmentFlags::ONEWAY);

        assert!(attributes.is_bridge());
        assert!(attributes.is_oneway());
        assert!(!attributes.is_tunnel());
    }
}
