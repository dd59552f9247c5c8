//! Common test fixtures for the dashboard tests.
//!
//! The GeoJSON fixtures mirror what the NOAA ice-chart MapServer returns for
//! `f=geojson` queries, including the bookkeeping fields the typed
//! attributes drop. The CSV fixtures follow the historical/projected
//! temperature table layout.

use std::fs;
use std::path::{Path, PathBuf};

use ice_common::{
    Feature, FeatureCollection, Geometry, IceAttributes, Position, RegionId,
};

/// Region codes used by the fixtures (same as the forecast regions).
pub mod regions {
    pub const CODES: [&str; 5] = ["625831", "635830", "635900", "645900", "645931"];

    /// A code absent from every fixture table.
    pub const UNKNOWN: &str = "999999";
}

/// Concentration layer response: one polygon crossing the antimeridian,
/// one open-water polygon in the Bering Sea.
pub const CONCENTRATION_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "id": 1,
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[175.0, 62.0], [-175.0, 62.0], [-175.0, 64.0], [175.0, 64.0], [175.0, 62.0]]]
      },
      "properties": {"objectid": 1, "ct": "92", "idp_filedate": 1718064000000, "idp_ingestdate": 1718067600000}
    },
    {
      "type": "Feature",
      "id": 2,
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-168.0, 58.0], [-162.0, 58.0], [-162.0, 60.0], [-168.0, 60.0], [-168.0, 58.0]]]
      },
      "properties": {"objectid": 2, "ct": "00", "idp_filedate": 1718064000000, "idp_ingestdate": 1718067600000}
    }
  ]
}"#;

/// Prediction layer response.
pub const PREDICTION_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "id": 1,
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[170.0, 60.0], [179.5, 60.0], [179.5, 61.0], [170.0, 60.0]]],
          [[[-179.5, 60.0], [-170.0, 60.0], [-170.0, 61.0], [-179.5, 60.0]]]
        ]
      },
      "properties": {"objectid": 1, "type": "Ice Free", "idp_filedate": 1718064000000}
    },
    {
      "type": "Feature",
      "id": 2,
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-170.0, 62.0], [-165.0, 62.0], [-165.0, 63.5], [-170.0, 62.0]]]
      },
      "properties": {"objectid": 2, "type": "Pack Ice", "idp_filedate": 1718064000000}
    }
  ]
}"#;

/// ArcGIS reports query errors in the body of a 200 response.
pub const ARCGIS_ERROR_JSON: &str = r#"{
  "error": {"code": 400, "message": "Invalid or missing input parameters.", "details": []}
}"#;

/// Static forecast-region grid: one 0.5 degree cell per region.
pub const REGION_GRID_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[-163.0, 59.5], [-162.5, 59.5], [-162.5, 60.0], [-163.0, 60.0], [-163.0, 59.5]]]},
     "properties": {"ADFG": "625831", "test": "Priority", "image_title": "<b>625831</b>", "image": "<img src='../images/625831.image.png'>"}},
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[-163.5, 58.5], [-163.0, 58.5], [-163.0, 59.0], [-163.5, 59.0], [-163.5, 58.5]]]},
     "properties": {"ADFG": 635830, "test": "Test", "image_title": "<b>635830</b>", "image": "<img src='../images/635830.image.png'>"}},
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[-163.5, 59.0], [-163.0, 59.0], [-163.0, 59.5], [-163.5, 59.5], [-163.5, 59.0]]]},
     "properties": {"ADFG": "635900", "test": "priority", "image_title": "<b>635900</b>", "image": "<img src='../images/635900.image.png'>"}},
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[-164.5, 59.0], [-164.0, 59.0], [-164.0, 59.5], [-164.5, 59.5], [-164.5, 59.0]]]},
     "properties": {"ADFG": "645900", "test": "Test", "image_title": "<b>645900</b>", "image": "<img src='../images/645900.image.png'>"}},
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[-164.5, 59.5], [-164.0, 59.5], [-164.0, 60.0], [-164.5, 60.0], [-164.5, 59.5]]]},
     "properties": {"ADFG": "645931", "test": "Priority", "image_title": "<b>645931</b>", "image": "<img src='../images/645931.image.png'>"}}
  ]
}"#;

/// Historical table: two years for 625831, one for 635830, a float-typed
/// region code and missing ICE cells.
pub const HISTORICAL_CSV: &str = "\
RegionID,Year,Yearday,SST,BOT,ICE
625831,2018,120,-1.2,-1.5,0.5
625831,2018,121,-1.0,-1.4,0.4
625831,2019,120,-0.8,-1.3,
625831,2019,121,-0.6,-1.2,0.2
625831.0,2020,120,-0.4,-1.1,0.7
635830,2018,120,0.5,-0.5,NaN
635830,2018,122,0.7,-0.4,0.1
";

/// Projected table for the current season.
pub const PROJECTED_CSV: &str = "\
RegionID,Year,Yearday,SST,BOT,ICE
625831,2025,120,-0.5,-1.0,0.3
625831,2025,121,-0.3,-0.9,0.25
635830,2025,120,0.9,-0.2,0.0
";

/// Write a fixture file into `dir` and return its path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Fresh temporary directory for a test.
pub fn scratch_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Parsed [`CONCENTRATION_GEOJSON`].
pub fn concentration_collection() -> FeatureCollection<IceAttributes> {
    FeatureCollection::from_geojson_str(CONCENTRATION_GEOJSON)
        .expect("Concentration fixture must parse")
}

/// Parsed [`PREDICTION_GEOJSON`].
pub fn prediction_collection() -> FeatureCollection<IceAttributes> {
    FeatureCollection::from_geojson_str(PREDICTION_GEOJSON).expect("Prediction fixture must parse")
}

/// A rectangle spanning `west..east` (west may be east of the antimeridian).
pub fn rectangle(west: f64, south: f64, east: f64, north: f64) -> Geometry {
    Geometry::polygon(vec![
        Position::new(west, south),
        Position::new(east, south),
        Position::new(east, north),
        Position::new(west, north),
        Position::new(west, south),
    ])
}

/// Single-record concentration collection with the given code.
pub fn concentration_with_code(code: &str) -> FeatureCollection<IceAttributes> {
    FeatureCollection::new(vec![Feature::new(
        rectangle(170.0, 60.0, -170.0, 62.0),
        IceAttributes::concentration(code),
    )])
}

/// Parse a fixture region code.
pub fn region(code: &str) -> RegionId {
    RegionId::parse(code).expect("Fixture region code must be valid")
}
