//! Forecast region identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommonError;

/// ADF&G statistical areas covered by the Kuskokwim Bay forecast.
pub const FORECAST_REGION_CODES: [&str; 5] = ["625831", "635830", "635900", "645900", "645931"];

/// Identifier of a forecast region.
///
/// Codes arrive as text in the grid file and as integers or floats in the
/// temperature tables, so every constructor normalizes to one textual form:
/// surrounding whitespace is dropped and an integral float (`625831.0`)
/// becomes its integer text (`625831`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Parse and normalize a region code.
    pub fn parse(code: &str) -> Result<Self, CommonError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(CommonError::InvalidRegionCode(code.to_string()));
        }

        let looks_fractional = trimmed.contains(&['.', 'e', 'E'][..]);
        if looks_fractional {
            if let Ok(value) = trimmed.parse::<f64>() {
                if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                    return Ok(RegionId((value as i64).to_string()));
                }
            }
        }

        Ok(RegionId(trimmed.to_string()))
    }

    /// The five Kuskokwim Bay forecast regions, in reporting order.
    pub fn forecast_regions() -> Vec<RegionId> {
        FORECAST_REGION_CODES
            .iter()
            .map(|code| RegionId(code.to_string()))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionId::parse(s)
    }
}

impl<'de> Deserialize<'de> for RegionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCode {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        let text = match RawCode::deserialize(deserializer)? {
            RawCode::Text(s) => s,
            RawCode::Integer(i) => i.to_string(),
            RawCode::Float(f) => f.to_string(),
        };
        RegionId::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_float_text() {
        assert_eq!(RegionId::parse("625831.0").unwrap().as_str(), "625831");
        assert_eq!(RegionId::parse(" 635830 ").unwrap().as_str(), "635830");
    }

    #[test]
    fn test_keeps_non_numeric_text() {
        assert_eq!(RegionId::parse("KB-1").unwrap().as_str(), "KB-1");
        assert_eq!(RegionId::parse("0645").unwrap().as_str(), "0645");
    }

    #[test]
    fn test_rejects_blank() {
        assert!(RegionId::parse("   ").is_err());
    }

    #[test]
    fn test_deserialize_number_and_text_agree() {
        let from_int: RegionId = serde_json::from_str("645900").unwrap();
        let from_float: RegionId = serde_json::from_str("645900.0").unwrap();
        let from_text: RegionId = serde_json::from_str("\"645900\"").unwrap();
        assert_eq!(from_int, from_text);
        assert_eq!(from_float, from_text);
    }

    #[test]
    fn test_forecast_regions() {
        let regions = RegionId::forecast_regions();
        assert_eq!(regions.len(), 5);
        assert_eq!(regions[0].to_string(), "625831");
        assert_eq!(regions[4].to_string(), "645931");
    }
}
