//! Coordinate reference frame of feature collections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes understood by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    #[default]
    Epsg4326,
}

impl CrsCode {
    /// Numeric EPSG code, as used in ArcGIS `outSR`/`inSR` query parameters.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

/// Longitude range that the vertices of a collection are expressed in.
///
/// Web maps draw a polygon crossing the antimeridian the long way round the
/// globe when longitudes stay in [-180, 180]. Shifting the eastern
/// hemisphere into [-360, 0] keeps such polygons in one contiguous band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeConvention {
    /// Longitudes in [-180, 180]
    #[default]
    Signed180,
    /// Longitudes in [-360, 0]
    Western360,
}

impl LongitudeConvention {
    /// Nominal (min, max) longitude of the convention.
    pub fn range(&self) -> (f64, f64) {
        match self {
            LongitudeConvention::Signed180 => (-180.0, 180.0),
            LongitudeConvention::Western360 => (-360.0, 0.0),
        }
    }

    /// Check whether a longitude lies within the nominal range.
    pub fn contains(&self, lon: f64) -> bool {
        let (min, max) = self.range();
        lon >= min && lon <= max
    }
}

impl fmt::Display for LongitudeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LongitudeConvention::Signed180 => write!(f, "[-180, 180]"),
            LongitudeConvention::Western360 => write!(f, "[-360, 0]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_code() {
        assert_eq!(CrsCode::Epsg4326.epsg(), 4326);
        assert_eq!(CrsCode::default(), CrsCode::Epsg4326);
    }

    #[test]
    fn test_display() {
        assert_eq!(CrsCode::Epsg4326.to_string(), "EPSG:4326");
        assert_eq!(LongitudeConvention::Western360.to_string(), "[-360, 0]");
    }

    #[test]
    fn test_convention_contains() {
        assert!(LongitudeConvention::Signed180.contains(150.0));
        assert!(!LongitudeConvention::Western360.contains(150.0));
        assert!(LongitudeConvention::Western360.contains(-210.0));
        assert!(LongitudeConvention::Western360.contains(0.0));
    }
}
