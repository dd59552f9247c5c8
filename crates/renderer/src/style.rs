//! Vector path styles for the map overlays.
//!
//! Each overlay gets one pure function from a record's attributes to a
//! [`PathStyle`]. The style serializes with Leaflet's path option names.

use ice_common::{IceAttributes, RegionCellAttributes};
use serde::{Deserialize, Serialize};

pub const CONCENTRATION_FILL: &str = "#5271ff";
pub const PREDICTION_FILL: &str = "#aaaaaa";
pub const ICE_OUTLINE: &str = "#ffffff";
pub const PRIORITY_FILL: &str = "green";
pub const SECONDARY_FILL: &str = "#ffff00";
pub const GRID_OUTLINE: &str = "black";
pub const GRID_DASH: &str = "5, 5";

const SHOWN: f64 = 0.5;
const HIDDEN: f64 = 0.0;

/// Leaflet path options for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub fill_color: String,
    pub color: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

/// Concentration polygons: hidden when the code contains "00" (open water).
///
/// A missing code is drawn.
pub fn concentration_style(attrs: &IceAttributes) -> PathStyle {
    let open_water = attrs.ct.as_deref().is_some_and(|ct| ct.contains("00"));
    PathStyle {
        fill_color: CONCENTRATION_FILL.to_string(),
        color: ICE_OUTLINE.to_string(),
        weight: 1.0,
        fill_opacity: Some(if open_water { HIDDEN } else { SHOWN }),
        dash_array: None,
    }
}

/// Prediction polygons: hidden when the type mentions "free" in any case.
///
/// A missing type is drawn.
pub fn prediction_style(attrs: &IceAttributes) -> PathStyle {
    let ice_free = attrs
        .prediction_type
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains("free"));
    PathStyle {
        fill_color: PREDICTION_FILL.to_string(),
        color: ICE_OUTLINE.to_string(),
        weight: 1.0,
        fill_opacity: Some(if ice_free { HIDDEN } else { SHOWN }),
        dash_array: None,
    }
}

/// Forecast grid cells: green for priority regions, yellow otherwise.
pub fn grid_style(attrs: &RegionCellAttributes) -> PathStyle {
    let priority = attrs
        .test
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains("pri"));
    PathStyle {
        fill_color: if priority { PRIORITY_FILL } else { SECONDARY_FILL }.to_string(),
        color: GRID_OUTLINE.to_string(),
        weight: 2.0,
        fill_opacity: None,
        dash_array: Some(GRID_DASH.to_string()),
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ice_common::RegionId;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#5271ff"), Some((0x52, 0x71, 0xff)));
        assert_eq!(hex_to_rgb("ffffff"), Some((255, 255, 255)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
    }

    #[test]
    fn test_style_serializes_leaflet_names() {
        let cell = RegionCellAttributes {
            region: RegionId::parse("625831").unwrap(),
            test: None,
            image_title: None,
            image: None,
            link: None,
        };
        let value = serde_json::to_value(grid_style(&cell)).unwrap();
        assert_eq!(value["fillColor"], "#ffff00");
        assert_eq!(value["dashArray"], "5, 5");
        assert!(value.get("fillOpacity").is_none());
    }
}
