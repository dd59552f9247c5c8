//! GeoJSON geometry records and collections.
//!
//! A [`FeatureCollection`] is the unit every stage of the map path works on:
//! the ice-chart client produces one per sublayer, the reprojector maps one
//! to a new one, and the map renderer serializes them into the document.
//!
//! Attributes are typed (`P`) instead of a free-form property bag, so a
//! collection cannot mix attribute schemas.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::crs::{CrsCode, LongitudeConvention};
use crate::error::{CommonError, CommonResult};

/// A longitude/latitude pair with optional elevation.
///
/// Serialized as a GeoJSON position array: `[lon, lat]` or `[lon, lat, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
    pub z: Option<f64>,
}

impl Position {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat, z: None }
    }

    pub fn with_z(lon: f64, lat: f64, z: f64) -> Self {
        Self {
            lon,
            lat,
            z: Some(z),
        }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = CommonError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat] => Ok(Position::new(*lon, *lat)),
            [lon, lat, z, ..] => Ok(Position::with_z(*lon, *lat, *z)),
            _ => Err(CommonError::InvalidPosition(format!(
                "expected at least 2 coordinates, got {}",
                values.len()
            ))),
        }
    }
}

impl From<Position> for Vec<f64> {
    fn from(p: Position) -> Self {
        match p.z {
            Some(z) => vec![p.lon, p.lat, z],
            None => vec![p.lon, p.lat],
        }
    }
}

/// GeoJSON geometry types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    /// Array of linear rings (first is exterior, rest are holes).
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

fn map_line<F>(line: &[Position], f: &F) -> Vec<Position>
where
    F: Fn(Position) -> Position,
{
    line.iter().map(|p| f(*p)).collect()
}

fn map_rings<F>(rings: &[Vec<Position>], f: &F) -> Vec<Vec<Position>>
where
    F: Fn(Position) -> Position,
{
    rings.iter().map(|ring| map_line(ring, f)).collect()
}

impl Geometry {
    /// Single polygon with one exterior ring.
    pub fn polygon(exterior: Vec<Position>) -> Self {
        Geometry::Polygon {
            coordinates: vec![exterior],
        }
    }

    /// Return a geometry of the same shape with every vertex passed through `f`.
    ///
    /// Vertex order within every ring and line is preserved.
    pub fn map_positions<F>(&self, f: F) -> Geometry
    where
        F: Fn(Position) -> Position,
    {
        match self {
            Geometry::Point { coordinates } => Geometry::Point {
                coordinates: f(*coordinates),
            },
            Geometry::MultiPoint { coordinates } => Geometry::MultiPoint {
                coordinates: map_line(coordinates, &f),
            },
            Geometry::LineString { coordinates } => Geometry::LineString {
                coordinates: map_line(coordinates, &f),
            },
            Geometry::MultiLineString { coordinates } => Geometry::MultiLineString {
                coordinates: map_rings(coordinates, &f),
            },
            Geometry::Polygon { coordinates } => Geometry::Polygon {
                coordinates: map_rings(coordinates, &f),
            },
            Geometry::MultiPolygon { coordinates } => Geometry::MultiPolygon {
                coordinates: coordinates
                    .iter()
                    .map(|polygon| map_rings(polygon, &f))
                    .collect(),
            },
        }
    }

    /// Visit every vertex in order.
    pub fn for_each_position<F>(&self, mut f: F)
    where
        F: FnMut(&Position),
    {
        match self {
            Geometry::Point { coordinates } => f(coordinates),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                coordinates.iter().for_each(&mut f)
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().flatten().for_each(&mut f)
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().flatten().for_each(&mut f)
            }
        }
    }

    /// Number of vertices across all parts.
    pub fn vertex_count(&self) -> usize {
        let mut count = 0;
        self.for_each_position(|_| count += 1);
        count
    }

    /// Extent of the geometry, or `None` when it has no vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        self.for_each_position(|p| {
            bbox = Some(match bbox {
                Some(mut b) => {
                    b.include(p.lon, p.lat);
                    b
                }
                None => BoundingBox::from_point(p.lon, p.lat),
            });
        });
        bbox
    }
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

/// A geometry record: optional geometry plus typed attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type", default = "feature_type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    /// Services may return records without geometry (`null`).
    pub geometry: Option<Geometry>,

    pub properties: P,
}

impl<P> Feature<P> {
    pub fn new(geometry: Geometry, properties: P) -> Self {
        Self {
            type_: feature_type(),
            id: None,
            geometry: Some(geometry),
            properties,
        }
    }

    /// Same record with its geometry replaced; attributes are cloned.
    pub fn with_geometry(&self, geometry: Option<Geometry>) -> Self
    where
        P: Clone,
    {
        Self {
            type_: self.type_.clone(),
            id: self.id.clone(),
            geometry,
            properties: self.properties.clone(),
        }
    }
}

/// An ordered sequence of geometry records sharing one coordinate frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub type_: String,

    pub features: Vec<Feature<P>>,

    /// Reference system of the vertices (not part of the GeoJSON payload).
    #[serde(skip)]
    pub crs: CrsCode,

    /// Longitude range of the vertices (not part of the GeoJSON payload).
    #[serde(skip)]
    pub convention: LongitudeConvention,
}

impl<P> FeatureCollection<P> {
    /// Collection in geographic WGS84 with longitudes in [-180, 180].
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            type_: feature_collection_type(),
            features,
            crs: CrsCode::Epsg4326,
            convention: LongitudeConvention::Signed180,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Extent of all geometries, or `None` if no record has a geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.as_ref().and_then(Geometry::bounds))
            .reduce(|a, b| a.union(&b))
    }

    /// Attributes of every record, in order.
    pub fn properties(&self) -> impl Iterator<Item = &P> {
        self.features.iter().map(|f| &f.properties)
    }
}

impl<P> Default for FeatureCollection<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: DeserializeOwned> FeatureCollection<P> {
    /// Parse a GeoJSON FeatureCollection document.
    pub fn from_geojson_str(json: &str) -> CommonResult<Self> {
        let collection: FeatureCollection<P> = serde_json::from_str(json)?;
        if collection.type_ != "FeatureCollection" {
            return Err(CommonError::InvalidGeoJson(format!(
                "expected FeatureCollection, got {}",
                collection.type_
            )));
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Props {
        name: String,
    }

    #[test]
    fn test_position_roundtrip_with_elevation() {
        let p: Position = serde_json::from_value(json!([-164.0, 59.5, 12.0])).unwrap();
        assert_eq!(p, Position::with_z(-164.0, 59.5, 12.0));
        assert_eq!(serde_json::to_value(p).unwrap(), json!([-164.0, 59.5, 12.0]));
    }

    #[test]
    fn test_position_rejects_single_coordinate() {
        let result: Result<Position, _> = serde_json::from_value(json!([1.0]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_collection_with_null_geometry() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": {"name": "a"}},
                {"type": "Feature",
                 "geometry": {"type": "Polygon", "coordinates": [[[170.0, 60.0], [-170.0, 60.0], [-170.0, 61.0], [170.0, 60.0]]]},
                 "properties": {"name": "b"}}
            ]
        }"#;
        let fc = FeatureCollection::<Props>::from_geojson_str(json).unwrap();
        assert_eq!(fc.len(), 2);
        assert!(fc.features[0].geometry.is_none());
        assert_eq!(fc.features[1].geometry.as_ref().unwrap().vertex_count(), 4);
        assert_eq!(fc.convention, LongitudeConvention::Signed180);
        assert_eq!(fc.bounds(), Some(BoundingBox::new(-170.0, 60.0, 170.0, 61.0)));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        let json = r#"{"type": "Feature", "features": []}"#;
        assert!(FeatureCollection::<Props>::from_geojson_str(json).is_err());
    }

    #[test]
    fn test_map_positions_preserves_order_and_shape() {
        let geom = Geometry::MultiPolygon {
            coordinates: vec![
                vec![vec![Position::new(1.0, 0.0), Position::new(2.0, 0.0)]],
                vec![
                    vec![Position::new(3.0, 0.0)],
                    vec![Position::new(4.0, 0.0), Position::new(5.0, 0.0)],
                ],
            ],
        };
        let shifted = geom.map_positions(|p| Position::new(p.lon * 10.0, p.lat));
        let mut lons = Vec::new();
        shifted.for_each_position(|p| lons.push(p.lon));
        assert_eq!(lons, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        match shifted {
            Geometry::MultiPolygon { coordinates } => {
                assert_eq!(coordinates.len(), 2);
                assert_eq!(coordinates[1].len(), 2);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_serialize_geometry_tag() {
        let geom = Geometry::Point {
            coordinates: Position::new(-164.0414, 56.8706),
        };
        assert_eq!(
            serde_json::to_value(&geom).unwrap(),
            json!({"type": "Point", "coordinates": [-164.0414, 56.8706]})
        );
    }

    #[test]
    fn test_empty_collection_has_no_bounds() {
        let fc: FeatureCollection<Props> = FeatureCollection::empty();
        assert!(fc.is_empty());
        assert!(fc.bounds().is_none());
    }
}
