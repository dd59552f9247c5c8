//! HTTP client for the ice-chart MapServer.

use async_trait::async_trait;
use ice_common::{CrsCode, FeatureCollection, IceAttributes};
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use crate::config::IceChartConfig;
use crate::error::{FetchError, Result};
use crate::response::parse_query_page;

/// Reference system requested from the service; collections are tagged with it.
const OUTPUT_CRS: CrsCode = CrsCode::Epsg4326;

/// Outcome of fetching both ice layers.
#[derive(Debug, Clone, PartialEq)]
pub enum IceChartFetch {
    Fetched {
        concentration: FeatureCollection<IceAttributes>,
        prediction: FeatureCollection<IceAttributes>,
    },
    Failed {
        reason: String,
    },
}

impl IceChartFetch {
    pub fn is_failed(&self) -> bool {
        matches!(self, IceChartFetch::Failed { .. })
    }

    /// Split into (concentration, prediction); a failure yields two empty
    /// collections.
    pub fn into_collections(
        self,
    ) -> (
        FeatureCollection<IceAttributes>,
        FeatureCollection<IceAttributes>,
    ) {
        match self {
            IceChartFetch::Fetched {
                concentration,
                prediction,
            } => (concentration, prediction),
            IceChartFetch::Failed { .. } => (FeatureCollection::empty(), FeatureCollection::empty()),
        }
    }
}

/// A provider of the concentration and prediction layers.
#[async_trait]
pub trait IceChartSource: Send + Sync {
    /// Fetch both layers. Never returns an error; failures are reported as
    /// [`IceChartFetch::Failed`].
    async fn fetch_ice_layers(&self) -> IceChartFetch;
}

/// ArcGIS REST implementation of [`IceChartSource`].
pub struct ArcGisIceChart {
    client: Client,
    config: IceChartConfig,
}

impl ArcGisIceChart {
    /// Create a client with the configured timeouts.
    pub fn new(config: IceChartConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &IceChartConfig {
        &self.config
    }

    /// Query one sublayer, following `exceededTransferLimit` pages.
    #[instrument(skip(self), fields(url = %self.config.service_url))]
    pub async fn fetch_layer(&self, layer: u32) -> Result<FeatureCollection<IceAttributes>> {
        let url = self.config.layer_query_url(layer);
        let mut features = Vec::new();
        let mut offset = 0usize;
        let out_sr = OUTPUT_CRS.epsg().to_string();

        for page_index in 0..self.config.max_pages {
            let offset_param = offset.to_string();
            let mut query: Vec<(&str, &str)> = vec![
                ("where", "1=1"),
                ("outFields", "*"),
                ("outSR", out_sr.as_str()),
                ("returnGeometry", "true"),
                ("f", "geojson"),
            ];
            if offset > 0 {
                query.push(("resultOffset", offset_param.as_str()));
            }

            debug!(page = page_index, offset = offset, "Querying layer");
            let response = self.client.get(&url).query(&query).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }

            let body = response.text().await?;
            let page = parse_query_page(&body)?;
            let received = page.features.len();
            features.extend(page.features);

            if !page.exceeded_transfer_limit || received == 0 {
                break;
            }
            if page_index + 1 == self.config.max_pages {
                warn!(
                    max_pages = self.config.max_pages,
                    count = features.len(),
                    "Page cap reached, layer may be truncated"
                );
            }
            offset += received;
        }

        info!(count = features.len(), crs = %OUTPUT_CRS, "Fetched layer");
        let mut collection = FeatureCollection::new(features);
        collection.crs = OUTPUT_CRS;
        Ok(collection)
    }

    async fn fetch_both(
        &self,
    ) -> Result<(
        FeatureCollection<IceAttributes>,
        FeatureCollection<IceAttributes>,
    )> {
        let concentration = self.fetch_layer(self.config.concentration_layer).await?;
        let prediction = self.fetch_layer(self.config.prediction_layer).await?;
        Ok((concentration, prediction))
    }
}

#[async_trait]
impl IceChartSource for ArcGisIceChart {
    async fn fetch_ice_layers(&self) -> IceChartFetch {
        info!(
            concentration_layer = self.config.concentration_layer,
            prediction_layer = self.config.prediction_layer,
            "Fetching ice chart layers"
        );

        match self.fetch_both().await {
            Ok((concentration, prediction)) => IceChartFetch::Fetched {
                concentration,
                prediction,
            },
            Err(e) => {
                error!(error = %e, "Failed to fetch ice chart data");
                IceChartFetch::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
