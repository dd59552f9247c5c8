//! Flat-file temperature table loader.

use std::fs::File;
use std::path::{Path, PathBuf};

use ice_common::{TemperatureRecord, TemperatureTable};
use tracing::{error, info};

use crate::error::{LoadError, Result};

/// Outcome of loading one temperature file.
#[derive(Debug, Clone, PartialEq)]
pub enum TableLoad {
    Loaded(TemperatureTable),
    Failed { path: PathBuf, reason: String },
}

impl TableLoad {
    pub fn is_failed(&self) -> bool {
        matches!(self, TableLoad::Failed { .. })
    }

    /// The loaded table, or an empty one after a failure.
    pub fn into_table(self) -> TemperatureTable {
        match self {
            TableLoad::Loaded(table) => table,
            TableLoad::Failed { .. } => TemperatureTable::empty(),
        }
    }
}

/// Read a temperature CSV with `RegionID, Year, Yearday, SST, BOT, ICE`
/// columns. Extra columns are ignored; any malformed row fails the read.
pub fn read_temperature_csv(path: &Path) -> Result<TemperatureTable> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let records = reader
        .deserialize::<TemperatureRecord>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    Ok(TemperatureTable::new(records))
}

/// Load a temperature file, logging and folding any failure into
/// [`TableLoad::Failed`].
pub fn load_temperature_table(path: &Path) -> TableLoad {
    match read_temperature_csv(path) {
        Ok(table) => {
            info!(path = %path.display(), count = table.len(), "Loaded temperature table");
            TableLoad::Loaded(table)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load temperature table");
            TableLoad::Failed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{write_fixture, HISTORICAL_CSV};

    #[test]
    fn test_read_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "historic.csv", HISTORICAL_CSV);
        let table = read_temperature_csv(&path).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.records[4].region.as_str(), "625831");
        assert_eq!(table.records[2].ice, None);
        assert_eq!(table.records[5].ice, None);
    }

    #[test]
    fn test_missing_file_is_failed() {
        let outcome = load_temperature_table(Path::new("/nonexistent/kuskokwim.csv"));
        match &outcome {
            TableLoad::Failed { path, reason } => {
                assert_eq!(path, Path::new("/nonexistent/kuskokwim.csv"));
                assert!(reason.contains("Failed to open"));
            }
            other => panic!("Expected failure, got {:?}", other),
        }
        assert!(outcome.into_table().is_empty());
    }

    #[test]
    fn test_malformed_row_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "bad.csv",
            "RegionID,Year,Yearday,SST,BOT,ICE\n625831,2020,1,1.0,0.5,0.1\n625831,twenty,2,1.0,0.5,0.1\n",
        );
        assert!(load_temperature_table(&path).is_failed());
    }

    #[test]
    fn test_extra_columns_and_order_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "extra.csv",
            "Station,ICE,Yearday,Year,RegionID,BOT,SST\nM2,0.4,10,2021,645900,-1.0,0.2\n",
        );
        let table = load_temperature_table(&path).into_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].yearday, 10);
        assert_eq!(table.records[0].ice, Some(0.4));
        assert_eq!(table.records[0].sst, Some(0.2));
    }
}
