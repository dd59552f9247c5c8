//! Dashboard configuration.
//!
//! Every setting has a default; a YAML file may override any subset:
//!
//! ```yaml
//! output_dir: /srv/dashboard/output
//! regions: ["625831", "635830"]
//! ice_chart:
//!   request_timeout_secs: 60
//! map:
//!   sst:
//!     enabled: true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ice_chart::IceChartConfig;
use ice_common::region::FORECAST_REGION_CODES;
use ice_common::RegionId;
use renderer::MapSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory receiving `footprint.html`
    pub output_dir: PathBuf,
    /// Directory receiving the region figures
    pub image_dir: PathBuf,
    /// Static forecast-region grid (GeoJSON)
    pub grid_file: PathBuf,
    pub historical_csv: PathBuf,
    pub projected_csv: PathBuf,
    /// Region codes to plot, in output order
    pub regions: Vec<String>,
    pub ice_chart: IceChartConfig,
    pub map: MapSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            image_dir: PathBuf::from("images"),
            grid_file: PathBuf::from("data/grid_ADFG.geojson"),
            historical_csv: PathBuf::from("data/kuskokwim_historic_data.csv"),
            projected_csv: PathBuf::from("data/kuskokwim_projected_data.csv"),
            regions: FORECAST_REGION_CODES.iter().map(|c| c.to_string()).collect(),
            ice_chart: IceChartConfig::default(),
            map: MapSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DashboardConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), regions = config.regions.len(), "Loaded dashboard config");
        Ok(config)
    }

    /// Reject settings that cannot produce a dashboard.
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            bail!("At least one region must be configured");
        }
        if self.map.zoom == 0 {
            bail!("Map zoom must be positive");
        }
        self.ice_chart
            .validate()
            .context("Invalid ice_chart settings")?;
        self.region_ids()?;
        Ok(())
    }

    /// Configured regions as normalized identifiers.
    pub fn region_ids(&self) -> Result<Vec<RegionId>> {
        self.regions
            .iter()
            .map(|code| {
                RegionId::parse(code).with_context(|| format!("Invalid region code '{}'", code))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_forecast_setup() {
        let config = DashboardConfig::default();
        assert_eq!(config.regions.len(), 5);
        assert_eq!(config.map.center, [59.75, -164.25]);
        assert_eq!(config.map.zoom, 4);
        assert_eq!(config.ice_chart.request_timeout_secs, 120);
        assert!(!config.map.sst.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
output_dir: /tmp/out
regions: ["625831.0", "645900"]
ice_chart:
  request_timeout_secs: 30
map:
  zoom: 6
  sst:
    enabled: true
"#;
        let config: DashboardConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.image_dir, PathBuf::from("images"));
        assert_eq!(config.ice_chart.request_timeout_secs, 30);
        assert_eq!(config.ice_chart.prediction_layer, 2);
        assert_eq!(config.map.zoom, 6);
        assert!(config.map.sst.enabled);
        assert_eq!(config.map.sst.lag_days, 6);

        let ids = config.region_ids().unwrap();
        assert_eq!(ids[0].as_str(), "625831");
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = DashboardConfig::default();
        config.regions.clear();
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.map.zoom = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.ice_chart.service_url = String::new();
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.ice_chart.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.regions = vec!["  ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashboardConfig::load(Path::new("/nonexistent/dashboard.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
