use std::{error, fmt};

use serde_json::{json, Value};

use crate::geom::{Geometry, MultiPolygon, Polygon, Ring};

/// Describes a malformed or unusable GeoJSON input
#[derive(Debug)]
#[non_exhaustive]
pub enum GeoJsonError {
    Json(serde_json::Error),
    /// The document contains no Polygon or MultiPolygon feature
    NoPolygonFeature,
    Malformed(&'static str),
}

impl From<serde_json::Error> for GeoJsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(error) => write!(f, "Invalid JSON: {}", error),
            Self::NoPolygonFeature => write!(f, "No polygon feature in GeoJSON input"),
            Self::Malformed(what) => write!(f, "Malformed GeoJSON: {}", what),
        }
    }
}

impl error::Error for GeoJsonError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Json(error) => Some(error),
            _ => None,
        }
    }
}

/// Reads the first polygon feature of a GeoJSON document. Accepts a
/// FeatureCollection (first Polygon/MultiPolygon feature wins), a single
/// Feature, or a bare geometry.
pub fn read_first_polygon(text: &str) -> Result<Geometry, GeoJsonError> {
    let value: Value = serde_json::from_str(text)?;
    let geometry = match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => value
            .get("features")
            .and_then(Value::as_array)
            .and_then(|features| {
                features.iter().find_map(|feature| {
                    let geometry = feature.get("geometry")?;
                    match geometry.get("type").and_then(Value::as_str) {
                        Some("Polygon") | Some("MultiPolygon") => Some(geometry),
                        _ => None,
                    }
                })
            })
            .ok_or(GeoJsonError::NoPolygonFeature)?,
        Some("Feature") => value.get("geometry").ok_or(GeoJsonError::NoPolygonFeature)?,
        Some("Polygon") | Some("MultiPolygon") => &value,
        _ => return Err(GeoJsonError::NoPolygonFeature),
    };
    geometry_from_value(geometry)
}

/// Serializes the repaired multipolygon as a FeatureCollection holding a
/// single MultiPolygon feature.
pub fn write_feature(multipolygon: &MultiPolygon) -> String {
    let coordinates: Vec<Value> = multipolygon.iter().map(polygon_coordinates).collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": coordinates
            }
        }]
    })
    .to_string()
}

fn geometry_from_value(value: &Value) -> Result<Geometry, GeoJsonError> {
    let coordinates = value
        .get("coordinates")
        .ok_or(GeoJsonError::Malformed("geometry without coordinates"))?;
    match value.get("type").and_then(Value::as_str) {
        Some("Polygon") => Ok(Geometry::Polygon(polygon_from_value(coordinates)?)),
        Some("MultiPolygon") => {
            let polygons = coordinates
                .as_array()
                .ok_or(GeoJsonError::Malformed("MultiPolygon coordinates must be an array"))?
                .iter()
                .map(polygon_from_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::from(polygons)))
        }
        _ => Err(GeoJsonError::NoPolygonFeature),
    }
}

fn polygon_from_value(value: &Value) -> Result<Polygon, GeoJsonError> {
    let mut rings = value
        .as_array()
        .ok_or(GeoJsonError::Malformed("Polygon coordinates must be an array"))?
        .iter()
        .map(ring_from_value)
        .collect::<Result<Vec<_>, _>>()?;
    if rings.is_empty() {
        return Ok(Polygon::new(Ring::new(Vec::new()), Vec::new()));
    }
    let shell = rings.remove(0);
    Ok(Polygon::new(shell, rings))
}

fn ring_from_value(value: &Value) -> Result<Ring, GeoJsonError> {
    let points = value
        .as_array()
        .ok_or(GeoJsonError::Malformed("ring must be an array of positions"))?
        .iter()
        .map(position_from_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Ring::new(points))
}

fn position_from_value(value: &Value) -> Result<[f64; 2], GeoJsonError> {
    let coords = value
        .as_array()
        .ok_or(GeoJsonError::Malformed("position must be an array"))?;
    if coords.len() < 2 {
        return Err(GeoJsonError::Malformed("position needs x and y"));
    }
    let x = coords[0].as_f64().ok_or(GeoJsonError::Malformed("coordinate must be a number"))?;
    let y = coords[1].as_f64().ok_or(GeoJsonError::Malformed("coordinate must be a number"))?;
    Ok([x, y])
}

fn polygon_coordinates(polygon: &Polygon) -> Value {
    let rings: Vec<Value> = polygon.rings().map(ring_coordinates).collect();
    Value::Array(rings)
}

// GeoJSON rings repeat the closing vertex.
fn ring_coordinates(ring: &Ring) -> Value {
    let mut positions: Vec<Value> = ring.vertices().iter().map(|v| json!([v[0], v[1]])).collect();
    if let Some(first) = ring.vertices().first() {
        positions.push(json!([first[0], first[1]]));
    }
    Value::Array(positions)
}
