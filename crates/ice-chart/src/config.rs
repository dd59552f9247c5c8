//! Ice-chart service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// NOAA Alaska Sea Ice Program ice-chart MapServer.
pub const DEFAULT_SERVICE_URL: &str =
    "https://mapservices.weather.noaa.gov/vector/rest/services/obs/asip_ice_chart/MapServer";

/// Connection and query settings for [`crate::ArcGisIceChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IceChartConfig {
    /// MapServer base URL (without a trailing layer index)
    pub service_url: String,
    /// Sublayer holding total ice concentration polygons
    pub concentration_layer: u32,
    /// Sublayer holding ice prediction polygons
    pub prediction_layer: u32,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Maximum number of pages requested per layer
    pub max_pages: u32,
}

impl Default for IceChartConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            concentration_layer: 0,
            prediction_layer: 2,
            request_timeout_secs: 120,
            connect_timeout_secs: 30,
            max_pages: 20,
        }
    }
}

impl IceChartConfig {
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Query endpoint of one sublayer.
    pub fn layer_query_url(&self, layer: u32) -> String {
        format!("{}/{}/query", self.service_url.trim_end_matches('/'), layer)
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_url.trim().is_empty() {
            return Err(FetchError::InvalidConfig(
                "service_url must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(FetchError::InvalidConfig(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(FetchError::InvalidConfig(
                "max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
