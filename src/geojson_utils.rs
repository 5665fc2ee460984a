use crate::drawable::{Drawable, SegmentAttributes, SegmentFlags};
use geo::{Geometry, LineString, Polygon};
use geojson::{GeoJson, JsonObject, JsonValue};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoJsonLoadError {
    #[error("open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("parse GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("convert GeoJSON geometry: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Reads features whose coordinates are already planar.
pub fn load_drawables_from_geojson(path: &Path) -> Result<Vec<Drawable>, GeoJsonLoadError> {
    let file = File::open(path).map_err(|source| GeoJsonLoadError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let geojson: GeoJson = serde_json::from_reader(BufReader::new(file))?;

    parse_drawables(geojson)
}

pub fn parse_drawables(geojson: GeoJson) -> Result<Vec<Drawable>, GeoJsonLoadError> {
    let mut drawables = Vec::new();

    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in collection.features {
                push_feature(&mut drawables, feature)?;
            }
        }
        GeoJson::Feature(feature) => push_feature(&mut drawables, feature)?,
        GeoJson::Geometry(geometry) => {
            push_geometry(&mut drawables, &Geometry::try_from(geometry)?, &SegmentAttributes::default());
        }
    }

    Ok(drawables)
}

fn push_feature(drawables: &mut Vec<Drawable>, feature: geojson::Feature) -> Result<(), GeoJsonLoadError> {
    let Some(geometry) = feature.geometry else {
        return Ok(());
    };

    let attributes = feature
        .properties
        .as_ref()
        .map(attributes_from_properties)
        .unwrap_or_default();

    push_geometry(drawables, &Geometry::try_from(geometry)?, &attributes);

    Ok(())
}

fn push_geometry(drawables: &mut Vec<Drawable>, geom: &Geometry, attributes: &SegmentAttributes) {
    let way = |line: LineString| Drawable::Way {
        line,
        attributes: attributes.clone(),
    };

    match geom {
        Geometry::GeometryCollection(gc) => {
            for geometry in gc {
                push_geometry(drawables, geometry, attributes);
            }
        }
        Geometry::Polygon(p) => push_polygon(drawables, p, attributes),
        Geometry::MultiPolygon(mp) => {
            for p in mp {
                push_polygon(drawables, p, attributes);
            }
        }
        Geometry::Rect(r) => push_polygon(drawables, &r.to_polygon(), attributes),
        Geometry::Triangle(t) => push_polygon(drawables, &t.to_polygon(), attributes),
        Geometry::MultiLineString(mls) => drawables.extend(mls.iter().cloned().map(way)),
        Geometry::LineString(ls) => drawables.push(way(ls.clone())),
        Geometry::Line(line) => drawables.push(way(LineString::new(vec![line.start, line.end]))),
        Geometry::Point(p) => drawables.push(Drawable::Node {
            coord: p.0,
            attributes: attributes.clone(),
        }),
        Geometry::MultiPoint(mp) => {
            drawables.extend(mp.iter().map(|p| Drawable::Node {
                coord: p.0,
                attributes: attributes.clone(),
            }));
        }
    }
}

fn push_polygon(drawables: &mut Vec<Drawable>, poly: &Polygon, attributes: &SegmentAttributes) {
    for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
        drawables.push(Drawable::Area {
            ring: ring.clone(),
            attributes: attributes.clone(),
        });
    }
}

fn is_yes(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => matches!(s.as_str(), "yes" | "true" | "1"),
        JsonValue::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

fn attributes_from_properties(properties: &JsonObject) -> SegmentAttributes {
    let string = |key: &str| properties.get(key).and_then(JsonValue::as_str).map(str::to_string);

    let mut attributes = SegmentAttributes::new(string("type").unwrap_or_default());

    attributes.name = string("name");
    attributes.reference = string("ref");

    attributes.layer = properties
        .get("layer")
        .and_then(JsonValue::as_i64)
        .map_or(0, |layer| layer.clamp(i8::MIN as i64, i8::MAX as i64) as i8);

    attributes.width = properties
        .get("width")
        .and_then(JsonValue::as_u64)
        .map(|width| width.min(u8::MAX as u64) as u8);

    for (key, value) in properties {
        if let Some(flag) = SegmentFlags::from_name(key) {
            if is_yes(value) {
                attributes.flags |= flag;
            }
        }
    }

    attributes
}
