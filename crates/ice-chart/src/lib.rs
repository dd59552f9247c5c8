//! Client for the NOAA Alaska Sea Ice Program ice chart.
//!
//! Two sublayers of the ASIP MapServer are used: total ice concentration
//! and the ice-edge prediction. Both are requested in WGS84 as GeoJSON and
//! decoded into typed [`ice_common::FeatureCollection`]s.
//!
//! The [`IceChartSource`] trait is the seam used by the dashboard pipeline;
//! [`ArcGisIceChart`] is the HTTP implementation. A fetch never fails
//! outright: transport, status and decoding problems are logged and folded
//! into [`IceChartFetch::Failed`].

pub mod client;
pub mod config;
pub mod error;
pub mod response;

// Re-exports
pub use client::{ArcGisIceChart, IceChartFetch, IceChartSource};
pub use config::{IceChartConfig, DEFAULT_SERVICE_URL};
pub use error::{FetchError, Result};
pub use response::{parse_query_page, QueryPage};
