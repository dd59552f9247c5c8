//! Common types shared across the sea-ice dashboard crates.

pub mod attributes;
pub mod bbox;
pub mod crs;
pub mod error;
pub mod feature;
pub mod region;
pub mod temperature;

pub use attributes::{IceAttributes, RegionCellAttributes};
pub use bbox::BoundingBox;
pub use crs::{CrsCode, LongitudeConvention};
pub use error::{CommonError, CommonResult};
pub use feature::{Feature, FeatureCollection, Geometry, Position};
pub use region::RegionId;
pub use temperature::{TemperatureRecord, TemperatureTable, Variable};
