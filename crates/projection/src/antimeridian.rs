//! Antimeridian-safe longitude reprojection.
//!
//! The transform maps the eastern hemisphere onto negative longitudes:
//!
//! ```text
//!   x > 0   ->  x - 360
//!   x <= 0  ->  x
//! ```
//!
//! The prime meridian itself (`x == 0`) counts as western and is left
//! alone, so a vertex on it keeps its longitude. `x == 180` maps to `-180`.
//! No bounds are checked; any finite or non-finite input follows the same
//! rule.

use ice_common::{Feature, FeatureCollection, LongitudeConvention, Position};
use tracing::{debug, info, warn};

/// Shift a longitude in [-180, 180] into [-360, 0].
///
/// The elevation argument is accepted for parity with 3D vertices and is
/// ignored.
///
/// # Arguments
/// * `x` - Longitude (degrees)
/// * `y` - Latitude (degrees), returned unchanged
/// * `_z` - Optional elevation, unused
pub fn convert_to_360_transform(x: f64, y: f64, _z: Option<f64>) -> (f64, f64) {
    if x > 0.0 {
        (x - 360.0, y)
    } else {
        (x, y)
    }
}

/// Apply [`convert_to_360_transform`] to a vertex, keeping its elevation.
pub fn shift_position(p: Position) -> Position {
    let (lon, lat) = convert_to_360_transform(p.lon, p.lat, p.z);
    Position { lon, lat, z: p.z }
}

/// Reproject every vertex of a collection into the [-360, 0] band.
///
/// Returns a new collection with the same records in the same order.
/// Attributes are cloned untouched and records without geometry stay
/// without geometry. An empty collection is returned as-is, so an upstream
/// fetch failure never stops rendering.
///
/// Running this on an already reprojected collection changes nothing, since
/// every longitude is then `<= 0`.
pub fn reproject_to_360<P: Clone>(collection: &FeatureCollection<P>) -> FeatureCollection<P> {
    if collection.is_empty() {
        warn!("Input feature collection is empty, skipping reprojection");
        return collection.clone();
    }

    info!(
        count = collection.len(),
        from = %collection.convention,
        "Reprojecting feature collection to prevent dateline wrapping"
    );

    let features: Vec<Feature<P>> = collection
        .features
        .iter()
        .map(|feature| {
            let geometry = feature
                .geometry
                .as_ref()
                .map(|g| g.map_positions(shift_position));
            feature.with_geometry(geometry)
        })
        .collect();

    let reprojected = FeatureCollection {
        type_: collection.type_.clone(),
        features,
        crs: collection.crs,
        convention: LongitudeConvention::Western360,
    };

    if let Some(bounds) = reprojected.bounds() {
        debug!(
            min_lon = bounds.min_x,
            max_lon = bounds.max_x,
            min_lat = bounds.min_y,
            max_lat = bounds.max_y,
            "Reprojected extent"
        );
    }

    reprojected
}

#[cfg(test)]
mod tests {
    use super::*;
    use ice_common::Geometry;

    #[test]
    fn test_eastern_hemisphere_shifts() {
        assert_eq!(convert_to_360_transform(150.0, 60.0, None), (-210.0, 60.0));
        assert_eq!(convert_to_360_transform(180.0, 65.0, None), (-180.0, 65.0));
        assert_eq!(convert_to_360_transform(1e-9, 0.0, None), (1e-9 - 360.0, 0.0));
    }

    #[test]
    fn test_western_hemisphere_unchanged() {
        assert_eq!(convert_to_360_transform(-150.0, 60.0, None), (-150.0, 60.0));
        assert_eq!(convert_to_360_transform(-180.0, -90.0, None), (-180.0, -90.0));
    }

    #[test]
    fn test_prime_meridian_is_western() {
        assert_eq!(convert_to_360_transform(0.0, 0.0, None), (0.0, 0.0));
        assert_eq!(convert_to_360_transform(-0.0, 10.0, None), (-0.0, 10.0));
    }

    #[test]
    fn test_elevation_ignored_but_kept_on_positions() {
        assert_eq!(
            convert_to_360_transform(10.0, 5.0, Some(100.0)),
            (-350.0, 5.0)
        );
        let p = shift_position(Position::with_z(10.0, 5.0, 100.0));
        assert_eq!(p, Position::with_z(-350.0, 5.0, 100.0));
    }

    #[test]
    fn test_out_of_range_input_follows_rule() {
        assert_eq!(convert_to_360_transform(400.0, 0.0, None), (40.0, 0.0));
        assert_eq!(convert_to_360_transform(-400.0, 0.0, None), (-400.0, 0.0));
    }

    #[test]
    fn test_reproject_empty_is_identity() {
        let empty: FeatureCollection<String> = FeatureCollection::empty();
        let out = reproject_to_360(&empty);
        assert!(out.is_empty());
        assert_eq!(out.convention, LongitudeConvention::Signed180);
    }

    #[test]
    fn test_reproject_keeps_missing_geometry() {
        let mut fc = FeatureCollection::new(vec![Feature::new(
            Geometry::Point {
                coordinates: Position::new(170.0, 60.0),
            },
            "a".to_string(),
        )]);
        fc.features[0].geometry = None;
        let out = reproject_to_360(&fc);
        assert_eq!(out.len(), 1);
        assert!(out.features[0].geometry.is_none());
        assert_eq!(out.features[0].properties, "a");
    }
}
