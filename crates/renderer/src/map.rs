//! Interactive web map composition.
//!
//! A [`MapDocument`] is a serializable description of the map: initial view,
//! base tiles and an ordered list of toggleable overlays. It is inlined as
//! JSON into [`MAP_TEMPLATE_HTML`] and written as one self-contained file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use ice_common::{FeatureCollection, Geometry, IceAttributes, RegionCellAttributes};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{RenderError, Result};
use crate::style::{concentration_style, grid_style, prediction_style, PathStyle};
use crate::template::MAP_TEMPLATE_HTML;

/// File name of the rendered map inside the output directory.
pub const MAP_FILE_NAME: &str = "footprint.html";

pub const CONCENTRATION_LAYER: &str = "Ice Concentration";
pub const PREDICTION_LAYER: &str = "Ice Prediction";
pub const GRID_LAYER: &str = "ADFG Regions (Forecast)";

/// A templated `{z}/{x}/{y}` tile service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSource {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

/// A WMS overlay whose `time` lags the run date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WmsSource {
    pub enabled: bool,
    pub name: String,
    pub url: String,
    pub layer: String,
    pub attribution: String,
    pub lag_days: u64,
}

impl Default for WmsSource {
    fn default() -> Self {
        Self {
            enabled: false,
            name: "NOAA Sea Surface Temp".to_string(),
            url: "https://coastwatch.pfeg.noaa.gov/erddap/wms/erdMBsstd8dayF_LonPM180/request"
                .to_string(),
            layer: "erdMBsstd8dayF_LonPM180:sst".to_string(),
            attribution: "NOAA NMFS SWFSC ERD".to_string(),
            lag_days: 6,
        }
    }
}

/// A fixed point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// HTML content of the popup.
    pub popup: String,
    pub tooltip: String,
}

/// Everything about the map that is not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub title: String,
    /// Initial view center as `[lat, lon]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub base_tiles: TileSource,
    pub contours: TileSource,
    pub sst: WmsSource,
    pub mooring: MarkerSpec,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            title: "Kuskokwim Bay Sea Ice".to_string(),
            center: [59.75, -164.25],
            zoom: 4,
            base_tiles: TileSource {
                name: "CartoDB Positron".to_string(),
                url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
                attribution: "&copy; OpenStreetMap contributors &copy; CARTO".to_string(),
            },
            contours: TileSource {
                name: "GEBCO Contours".to_string(),
                url: "https://tiles.arcgis.com/tiles/C8EMgrsFcRFL6LrL/arcgis/rest/services/GEBCO_contours/MapServer/tile/{z}/{y}/{x}".to_string(),
                attribution: "GEBCO; NOAA NCEI".to_string(),
            },
            sst: WmsSource::default(),
            mooring: MarkerSpec {
                name: "M2 Mooring".to_string(),
                lat: 56.8706,
                lon: -164.0414,
                popup: "<i>M2 \"Peggy\" Mooring</i>".to_string(),
                tooltip: "Click for more info".to_string(),
            },
        }
    }
}

/// Feature tooltip built from attribute fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipSpec {
    pub fields: Vec<String>,
    pub aliases: Vec<String>,
    pub sticky: bool,
}

impl TooltipSpec {
    fn single(field: &str, alias: &str) -> Self {
        Self {
            fields: vec![field.to_string()],
            aliases: vec![alias.to_string()],
            sticky: true,
        }
    }

    /// Tooltip showing the bare field value without a label.
    fn unlabeled(field: &str) -> Self {
        Self::single(field, "")
    }
}

/// Feature popup built from attribute fields rendered as HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupSpec {
    pub fields: Vec<String>,
    pub labels: bool,
    pub style: String,
    pub max_width: u32,
}

/// A GeoJSON feature carrying its own path style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledFeature {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub geometry: Option<Geometry>,
    pub properties: serde_json::Value,
    pub style: PathStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledCollection {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub features: Vec<StyledFeature>,
}

/// Attach `style(properties)` to every record of a collection.
pub fn styled_collection<P, F>(collection: &FeatureCollection<P>, style: F) -> Result<StyledCollection>
where
    P: Serialize,
    F: Fn(&P) -> PathStyle,
{
    let features = collection
        .features
        .iter()
        .map(|feature| -> Result<StyledFeature> {
            Ok(StyledFeature {
                type_: "Feature",
                geometry: feature.geometry.clone(),
                properties: serde_json::to_value(&feature.properties)?,
                style: style(&feature.properties),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StyledCollection {
        type_: "FeatureCollection",
        features,
    })
}

/// One toggleable layer of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    #[serde(rename = "geojson")]
    GeoJson {
        name: String,
        show: bool,
        data: StyledCollection,
        tooltip: Option<TooltipSpec>,
        popup: Option<PopupSpec>,
    },
    Tiles {
        name: String,
        show: bool,
        url: String,
        attribution: String,
    },
    Wms {
        name: String,
        show: bool,
        url: String,
        layers: String,
        format: String,
        transparent: bool,
        time: String,
        attribution: String,
    },
    Marker {
        name: String,
        show: bool,
        lat: f64,
        lon: f64,
        popup: String,
        tooltip: String,
    },
}

impl Overlay {
    pub fn name(&self) -> &str {
        match self {
            Overlay::GeoJson { name, .. }
            | Overlay::Tiles { name, .. }
            | Overlay::Wms { name, .. }
            | Overlay::Marker { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub base: TileSource,
}

/// Complete description of the web map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub title: String,
    pub view: MapView,
    pub overlays: Vec<Overlay>,
}

impl MapDocument {
    pub fn overlay_names(&self) -> Vec<&str> {
        self.overlays.iter().map(Overlay::name).collect()
    }

    /// Render the self-contained HTML page.
    pub fn to_html(&self) -> Result<String> {
        // A literal "</script>" inside the inlined JSON would end the script.
        let spec = serde_json::to_string(self)?.replace("</", "<\\/");
        Ok(MAP_TEMPLATE_HTML
            .replace("{{TITLE}}", &escape_html(&self.title))
            .replace("{{MAP_SPEC}}", &spec))
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `time` parameter of the SST overlay: midnight UTC `lag_days` before the run.
pub fn sst_time(run_date: NaiveDate, lag_days: u64) -> String {
    let day = run_date
        .checked_sub_days(Days::new(lag_days))
        .unwrap_or(run_date);
    day.format("%Y-%m-%dT00:00:00Z").to_string()
}

/// Read the static forecast-region grid file.
pub fn load_region_grid(path: &Path) -> Result<FeatureCollection<RegionCellAttributes>> {
    let text = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
    let grid = FeatureCollection::from_geojson_str(&text).map_err(|e| RenderError::Grid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), count = grid.len(), "Loaded region grid");
    Ok(grid)
}

/// Compose the map from the (reprojected) ice layers and the region grid.
///
/// Empty ice layers are left out; every other overlay is always present.
pub fn build_map_document(
    settings: &MapSettings,
    concentration: &FeatureCollection<IceAttributes>,
    prediction: &FeatureCollection<IceAttributes>,
    grid: &FeatureCollection<RegionCellAttributes>,
    run_date: NaiveDate,
) -> Result<MapDocument> {
    let mut overlays = Vec::new();

    if concentration.is_empty() {
        warn!(layer = CONCENTRATION_LAYER, "No features, layer omitted");
    } else {
        overlays.push(Overlay::GeoJson {
            name: CONCENTRATION_LAYER.to_string(),
            show: true,
            data: styled_collection(concentration, concentration_style)?,
            tooltip: Some(TooltipSpec::single("ct", "Total Concentration:")),
            popup: None,
        });
    }

    if prediction.is_empty() {
        warn!(layer = PREDICTION_LAYER, "No features, layer omitted");
    } else {
        overlays.push(Overlay::GeoJson {
            name: PREDICTION_LAYER.to_string(),
            show: true,
            data: styled_collection(prediction, prediction_style)?,
            tooltip: Some(TooltipSpec::single("type", "Prediction:")),
            popup: None,
        });
    }

    overlays.push(Overlay::GeoJson {
        name: GRID_LAYER.to_string(),
        show: true,
        data: styled_collection(grid, grid_style)?,
        tooltip: Some(TooltipSpec::unlabeled("ADFG")),
        popup: Some(PopupSpec {
            fields: vec!["image_title".to_string(), "image".to_string()],
            labels: false,
            style: "min-inline-size: 250px;".to_string(),
            max_width: 800,
        }),
    });

    overlays.push(Overlay::Tiles {
        name: settings.contours.name.clone(),
        show: true,
        url: settings.contours.url.clone(),
        attribution: settings.contours.attribution.clone(),
    });

    if settings.sst.enabled {
        overlays.push(Overlay::Wms {
            name: settings.sst.name.clone(),
            show: true,
            url: settings.sst.url.clone(),
            layers: settings.sst.layer.clone(),
            format: "image/png".to_string(),
            transparent: true,
            time: sst_time(run_date, settings.sst.lag_days),
            attribution: settings.sst.attribution.clone(),
        });
    }

    let mooring = &settings.mooring;
    overlays.push(Overlay::Marker {
        name: mooring.name.clone(),
        show: true,
        lat: mooring.lat,
        lon: mooring.lon,
        popup: mooring.popup.clone(),
        tooltip: mooring.tooltip.clone(),
    });

    Ok(MapDocument {
        title: settings.title.clone(),
        view: MapView {
            center: settings.center,
            zoom: settings.zoom,
            base: settings.base_tiles.clone(),
        },
        overlays,
    })
}

/// Write `footprint.html` into `output_dir`, creating the directory.
pub fn write_map(document: &MapDocument, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| RenderError::io(output_dir, e))?;

    let path = output_dir.join(MAP_FILE_NAME);
    let html = document.to_html()?;
    fs::write(&path, html).map_err(|e| RenderError::io(&path, e))?;

    info!(
        path = %path.display(),
        overlays = document.overlays.len(),
        "Wrote map"
    );
    Ok(path)
}
