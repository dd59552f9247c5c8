//! Regional temperature climatology.
//!
//! Loads the historical and projected temperature tables and turns them into
//! the per-region traces drawn by the plot renderer:
//!
//! - [`loader`]: CSV reading with an explicit [`TableLoad`] outcome
//! - [`aggregate`]: partitioning by region, grouping by year and the
//!   per-Yearday median climatology

pub mod aggregate;
pub mod error;
pub mod loader;

// Re-exports
pub use aggregate::{median, partition_by_region, ClimatologyPoint, RegionPartition, SeriesPoint};
pub use error::{LoadError, Result};
pub use loader::{load_temperature_table, read_temperature_csv, TableLoad};
