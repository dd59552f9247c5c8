//! Integration tests: load fixture tables and aggregate per region.

use climatology::{load_temperature_table, partition_by_region, TableLoad};
use ice_common::{RegionId, Variable};
use test_utils::{
    assert_approx_eq, regions, synthetic_temperature_table, write_fixture, HISTORICAL_CSV,
    PROJECTED_CSV,
};

fn region_ids(codes: &[&str]) -> Vec<RegionId> {
    codes.iter().map(|c| RegionId::parse(c).unwrap()).collect()
}

#[test]
fn test_partition_follows_configured_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "historic.csv", HISTORICAL_CSV);
    let table = load_temperature_table(&path).into_table();

    let partitions = partition_by_region(&table, &region_ids(&regions::CODES));
    let names: Vec<_> = partitions.iter().map(|p| p.region.to_string()).collect();
    assert_eq!(names, regions::CODES.to_vec());

    // The float-typed 625831.0 row joins its region.
    assert_eq!(partitions[0].len(), 5);
    assert_eq!(partitions[1].len(), 2);
    assert!(partitions[2].is_empty());
}

#[test]
fn test_unknown_region_is_empty() {
    let table = synthetic_temperature_table(&["625831"], &[2018, 2019], 1..=10);
    let partitions = partition_by_region(&table, &region_ids(&[regions::UNKNOWN]));
    assert_eq!(partitions.len(), 1);

    let partition = &partitions[0];
    assert!(partition.is_empty());
    assert!(partition.by_year().is_empty());
    assert!(partition.climatology(Variable::Ice).is_empty());
    assert!(partition.series(Variable::SeaSurface).is_empty());
    assert_eq!(partition.yearday_span(), None);
}

#[test]
fn test_fixture_climatology() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "historic.csv", HISTORICAL_CSV);
    let table = load_temperature_table(&path).into_table();
    let partitions = partition_by_region(&table, &region_ids(&["625831", "635830"]));

    // Day 120 of 625831: ICE 0.5, missing, 0.7.
    let clim = partitions[0].climatology(Variable::Ice);
    assert_eq!(clim.len(), 2);
    assert_eq!(clim[0].yearday, 120);
    assert_approx_eq!(clim[0].median.unwrap(), 0.6, 1e-12);
    assert_eq!(clim[1].yearday, 121);
    assert_approx_eq!(clim[1].median.unwrap(), 0.3, 1e-12);

    // 635830 day 120 has only a NaN ICE value.
    let clim = partitions[1].climatology(Variable::Ice);
    assert_eq!(clim[0].yearday, 120);
    assert_eq!(clim[0].median, None);
    assert_eq!(clim[1].yearday, 122);
}

#[test]
fn test_year_series_per_year() {
    let table = synthetic_temperature_table(&["645900"], &[2019, 2018, 2020], 100..=102);
    let partitions = partition_by_region(&table, &region_ids(&["645900"]));
    let traces = partitions[0].year_series(Variable::SeaSurface);

    let years: Vec<_> = traces.iter().map(|(y, _)| *y).collect();
    assert_eq!(years, vec![2018, 2019, 2020]);
    assert!(traces.iter().all(|(_, points)| points.len() == 3));

    // 2018 was the second year generated (offset 1).
    assert_approx_eq!(traces[0].1[0].value, 2.0, 1e-12);
}

#[test]
fn test_projected_series_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "projected.csv", PROJECTED_CSV);
    let outcome = load_temperature_table(&path);
    assert!(matches!(outcome, TableLoad::Loaded(_)));

    let table = outcome.into_table();
    let partitions = partition_by_region(&table, &region_ids(&["625831"]));
    let bot = partitions[0].series(Variable::Bottom);
    let days: Vec<_> = bot.iter().map(|p| p.yearday).collect();
    assert_eq!(days, vec![120, 121]);
    assert_approx_eq!(bot[1].value, -0.9, 1e-12);
}
