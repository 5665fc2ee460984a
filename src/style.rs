use crate::{
    colors::{self, Color},
    drawable::{Drawable, SegmentFlags},
};
use regex::Regex;
use std::{str::FromStr, sync::LazyLock};
use thiserror::Error;

/// One stroke drawn for every matching feature.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    /// Signed perpendicular offset in pixels, 0 strokes the feature itself.
    pub offset: f64,
    pub width: f64,
    pub color: Color,
    pub dash: Vec<f64>,
    /// Flags a feature must carry for the layer to apply.
    pub flags: SegmentFlags,
}

impl LineLayer {
    pub const fn new(offset: f64, width: f64, color: Color) -> Self {
        Self {
            offset,
            width,
            color,
            dash: Vec::new(),
            flags: SegmentFlags::empty(),
        }
    }

    pub fn applies_to(&self, drawable: &Drawable) -> bool {
        if !drawable.attributes().flags.contains(self.flags) {
            return false;
        }

        !matches!(drawable, Drawable::Node { .. }) || self.offset == 0.0
    }

    /// Casing on both sides of a road plus its fill.
    pub fn road(width: f64, casing_width: f64) -> Vec<Self> {
        let offset = (width + casing_width) / 2.0;

        vec![
            Self::new(-offset, casing_width, colors::CASING),
            Self::new(offset, casing_width, colors::CASING),
            Self::new(0.0, width, colors::ROAD),
        ]
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum StyleParseError {
    #[error("expected OFFSET:WIDTH:#RRGGBB[:FLAGS][:DASH], got {0:?}")]
    Syntax(String),

    #[error("invalid color {0:?}")]
    Color(String),

    #[error("unknown flag {0:?}")]
    Flag(String),

    #[error("invalid number {0:?}")]
    Number(String),
}

static LAYER_REGEXP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<offset>[-+]?\d+(?:\.\d*)?):(?P<width>\d+(?:\.\d*)?):(?P<color>#[0-9a-fA-F]{6})(?::(?P<flags>-|[a-z_]+(?:\|[a-z_]+)*))?(?::(?P<dash>\d+(?:\.\d*)?(?:,\d+(?:\.\d*)?)*))?$")
        .expect("valid layer regexp")
});

fn parse_number(s: &str) -> Result<f64, StyleParseError> {
    s.parse::<f64>()
        .map_err(|_| StyleParseError::Number(s.to_string()))
}

impl FromStr for LineLayer {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(m) = LAYER_REGEXP.captures(s.trim()) else {
            return Err(StyleParseError::Syntax(s.to_string()));
        };

        let color = &m["color"];

        let mut layer = Self::new(
            parse_number(&m["offset"])?,
            parse_number(&m["width"])?,
            colors::parse_hex(color).ok_or_else(|| StyleParseError::Color(color.to_string()))?,
        );

        if let Some(flags) = m.name("flags").map(|m| m.as_str()).filter(|f| *f != "-") {
            for name in flags.split('|') {
                layer.flags |= SegmentFlags::from_name(name)
                    .ok_or_else(|| StyleParseError::Flag(name.to_string()))?;
            }
        }

        if let Some(dash) = m.name("dash") {
            layer.dash = dash
                .as_str()
                .split(',')
                .map(parse_number)
                .collect::<Result<_, _>>()?;
        }

        Ok(layer)
    }
}
