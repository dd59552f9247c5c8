//! Per-region partitioning, per-year grouping and day-of-year medians.

use std::collections::BTreeMap;

use ice_common::{RegionId, TemperatureRecord, TemperatureTable, Variable};
use tracing::debug;

/// A `(Yearday, value)` point of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub yearday: u16,
    pub value: f64,
}

/// Median of one variable across all years for one day of year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimatologyPoint {
    pub yearday: u16,
    /// `None` when every value of the day is missing.
    pub median: Option<f64>,
}

/// Median of `values`, or `None` if empty.
///
/// An even count yields the mean of the two middle values.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// All records of one region, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPartition {
    pub region: RegionId,
    pub records: Vec<TemperatureRecord>,
}

impl RegionPartition {
    /// Collect the records of `region` from `table`.
    pub fn from_table(table: &TemperatureTable, region: &RegionId) -> Self {
        Self {
            region: region.clone(),
            records: table.for_region(region).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records grouped by year, years ascending, file order within a year.
    pub fn by_year(&self) -> BTreeMap<i32, Vec<&TemperatureRecord>> {
        let mut years: BTreeMap<i32, Vec<&TemperatureRecord>> = BTreeMap::new();
        for record in &self.records {
            years.entry(record.year).or_default().push(record);
        }
        years
    }

    /// Present values of `variable` in file order.
    pub fn series(&self, variable: Variable) -> Vec<SeriesPoint> {
        collect_series(self.records.iter(), variable)
    }

    /// One trace of `variable` per year, years ascending.
    pub fn year_series(&self, variable: Variable) -> Vec<(i32, Vec<SeriesPoint>)> {
        self.by_year()
            .into_iter()
            .map(|(year, records)| (year, collect_series(records.into_iter(), variable)))
            .collect()
    }

    /// Median of `variable` per Yearday across all years, Yearday ascending.
    ///
    /// Missing values are excluded. A Yearday with only missing values keeps
    /// its entry with an absent median.
    pub fn climatology(&self, variable: Variable) -> Vec<ClimatologyPoint> {
        let mut days: BTreeMap<u16, Vec<f64>> = BTreeMap::new();
        for record in &self.records {
            let values = days.entry(record.yearday).or_default();
            if let Some(v) = record.value(variable) {
                values.push(v);
            }
        }

        days.into_iter()
            .map(|(yearday, values)| ClimatologyPoint {
                yearday,
                median: median(values),
            })
            .collect()
    }

    /// Smallest and largest Yearday of the partition.
    pub fn yearday_span(&self) -> Option<(u16, u16)> {
        let min = self.records.iter().map(|r| r.yearday).min()?;
        let max = self.records.iter().map(|r| r.yearday).max()?;
        Some((min, max))
    }
}

fn collect_series<'a>(
    records: impl Iterator<Item = &'a TemperatureRecord>,
    variable: Variable,
) -> Vec<SeriesPoint> {
    records
        .filter_map(|r| {
            r.value(variable).map(|value| SeriesPoint {
                yearday: r.yearday,
                value,
            })
        })
        .collect()
}

/// Split `table` into one partition per region, in the order of `regions`.
///
/// Regions without records get an empty partition.
pub fn partition_by_region(table: &TemperatureTable, regions: &[RegionId]) -> Vec<RegionPartition> {
    regions
        .iter()
        .map(|region| {
            let partition = RegionPartition::from_table(table, region);
            debug!(region = %region, count = partition.len(), "Partitioned region");
            partition
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, yearday: u16, ice: Option<f64>) -> TemperatureRecord {
        TemperatureRecord::new(
            RegionId::parse("625831").unwrap(),
            year,
            yearday,
            Some(1.0),
            Some(0.0),
            ice,
        )
    }

    #[test]
    fn test_median_odd_even_empty() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert!((median(vec![0.7, 0.5]).unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(median(Vec::new()), None);
    }

    #[test]
    fn test_climatology_skips_missing() {
        let partition = RegionPartition {
            region: RegionId::parse("625831").unwrap(),
            records: vec![
                record(2018, 120, Some(0.5)),
                record(2019, 120, None),
                record(2020, 120, Some(0.7)),
            ],
        };
        let clim = partition.climatology(Variable::Ice);
        assert_eq!(clim.len(), 1);
        assert_eq!(clim[0].yearday, 120);
        let m = clim[0].median.unwrap();
        assert!((m - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_all_missing_day_keeps_entry() {
        let partition = RegionPartition {
            region: RegionId::parse("625831").unwrap(),
            records: vec![record(2018, 5, None), record(2018, 3, Some(0.2))],
        };
        let clim = partition.climatology(Variable::Ice);
        assert_eq!(
            clim,
            vec![
                ClimatologyPoint { yearday: 3, median: Some(0.2) },
                ClimatologyPoint { yearday: 5, median: None },
            ]
        );
    }

    #[test]
    fn test_by_year_sorted_with_file_order_inside() {
        let partition = RegionPartition {
            region: RegionId::parse("625831").unwrap(),
            records: vec![
                record(2020, 2, None),
                record(2018, 9, None),
                record(2020, 1, None),
            ],
        };
        let years = partition.by_year();
        let keys: Vec<_> = years.keys().copied().collect();
        assert_eq!(keys, vec![2018, 2020]);
        let days: Vec<_> = years[&2020].iter().map(|r| r.yearday).collect();
        assert_eq!(days, vec![2, 1]);
    }

    #[test]
    fn test_yearday_span() {
        let partition = RegionPartition {
            region: RegionId::parse("625831").unwrap(),
            records: vec![record(2020, 40, None), record(2019, 7, None)],
        };
        assert_eq!(partition.yearday_span(), Some((7, 40)));
    }
}
