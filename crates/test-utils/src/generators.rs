//! Test data generators for creating synthetic tables and geometries.

use ice_common::{Feature, FeatureCollection, Geometry, Position, RegionId, TemperatureRecord, TemperatureTable};

/// Create a synthetic temperature table.
///
/// Every region gets one record per (year, yearday). Values follow simple
/// linear patterns so medians are easy to predict:
/// - `SST = year_offset + yearday / 100`
/// - `BOT = SST - 1`
/// - `ICE = 0.1 * year_offset` capped at 1
///
/// # Arguments
/// * `regions` - Region codes
/// * `years` - Years to include, in order
/// * `yeardays` - Day-of-year range, e.g. `100..=110`
pub fn synthetic_temperature_table(
    regions: &[&str],
    years: &[i32],
    yeardays: std::ops::RangeInclusive<u16>,
) -> TemperatureTable {
    let mut records = Vec::new();

    for code in regions {
        let region = RegionId::parse(code).expect("Generator region code must be valid");
        for (offset, &year) in years.iter().enumerate() {
            for yearday in yeardays.clone() {
                let sst = offset as f64 + yearday as f64 / 100.0;
                records.push(TemperatureRecord::new(
                    region.clone(),
                    year,
                    yearday,
                    Some(sst),
                    Some(sst - 1.0),
                    Some((0.1 * offset as f64).min(1.0)),
                ));
            }
        }
    }

    TemperatureTable::new(records)
}

/// Create a closed polygon ring that crosses the antimeridian.
///
/// The ring starts at `east_lon` (in the eastern hemisphere) and extends
/// `span` degrees eastward, wrapping past 180.
pub fn antimeridian_polygon(east_lon: f64, span: f64, south: f64, north: f64) -> Geometry {
    let wrap = |lon: f64| if lon > 180.0 { lon - 360.0 } else { lon };
    let west = east_lon;
    let east = wrap(east_lon + span);

    Geometry::polygon(vec![
        Position::new(west, south),
        Position::new(east, south),
        Position::new(east, north),
        Position::new(west, north),
        Position::new(west, south),
    ])
}

/// Create a collection of `count` antimeridian polygons with the given
/// attribute builder.
pub fn antimeridian_collection<P, F>(count: usize, attributes: F) -> FeatureCollection<P>
where
    F: Fn(usize) -> P,
{
    let features = (0..count)
        .map(|i| {
            let south = 55.0 + i as f64;
            Feature::new(
                antimeridian_polygon(170.0 + i as f64, 15.0, south, south + 0.5),
                attributes(i),
            )
        })
        .collect();
    FeatureCollection::new(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ice_common::Variable;

    #[test]
    fn test_synthetic_table_size() {
        let table = synthetic_temperature_table(&["625831", "635830"], &[2018, 2019], 100..=104);
        assert_eq!(table.len(), 2 * 2 * 5);
    }

    #[test]
    fn test_synthetic_values() {
        let table = synthetic_temperature_table(&["625831"], &[2018, 2019], 100..=100);
        let ssts: Vec<_> = table
            .records
            .iter()
            .map(|r| r.value(Variable::SeaSurface))
            .collect();
        assert_eq!(ssts, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_antimeridian_polygon_wraps() {
        let poly = antimeridian_polygon(175.0, 10.0, 60.0, 61.0);
        let mut lons = Vec::new();
        poly.for_each_position(|p| lons.push(p.lon));
        assert!(lons.contains(&175.0));
        assert!(lons.contains(&-175.0));
        assert_eq!(poly.vertex_count(), 5);
    }

    #[test]
    fn test_antimeridian_collection() {
        let fc = antimeridian_collection(3, |i| i);
        assert_eq!(fc.len(), 3);
        assert_eq!(fc.features[2].properties, 2);
    }
}
