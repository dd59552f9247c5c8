//! Typed feature attributes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::region::RegionId;

/// Accept a string, a number, a boolean or null as optional text.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Attributes of an ice-chart polygon.
///
/// The concentration layer fills `ct`, the prediction layer fills `type`.
/// Service bookkeeping fields (ingest dates, object ids) are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceAttributes {
    /// Total concentration code, e.g. "00", "50", "9+".
    #[serde(default, deserialize_with = "optional_text")]
    pub ct: Option<String>,

    /// Prediction classification, e.g. "Ice Free".
    #[serde(rename = "type", default, deserialize_with = "optional_text")]
    pub prediction_type: Option<String>,
}

impl IceAttributes {
    pub fn concentration(code: impl Into<String>) -> Self {
        Self {
            ct: Some(code.into()),
            prediction_type: None,
        }
    }

    pub fn prediction(kind: impl Into<String>) -> Self {
        Self {
            ct: None,
            prediction_type: Some(kind.into()),
        }
    }
}

/// Attributes of a cell in the static forecast-region grid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCellAttributes {
    #[serde(rename = "ADFG")]
    pub region: RegionId,

    /// Priority/test marker, e.g. "Priority" or "Test".
    #[serde(default, deserialize_with = "optional_text")]
    pub test: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    pub image_title: Option<String>,

    /// HTML snippet (usually an `<img>` tag) shown in the popup.
    #[serde(default, deserialize_with = "optional_text")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "optional_text")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ice_attributes_drop_bookkeeping_fields() {
        let attrs: IceAttributes = serde_json::from_value(json!({
            "ct": "92",
            "idp_filedate": 1718000000000i64,
            "idp_ingestdate": 1718000000000i64,
            "objectid": 7
        }))
        .unwrap();
        assert_eq!(attrs, IceAttributes::concentration("92"));
        assert_eq!(
            serde_json::to_value(&attrs).unwrap(),
            json!({"ct": "92", "type": null})
        );
    }

    #[test]
    fn test_ice_attributes_numeric_code_becomes_text() {
        let attrs: IceAttributes = serde_json::from_value(json!({"ct": 50, "type": null})).unwrap();
        assert_eq!(attrs.ct.as_deref(), Some("50"));
        assert!(attrs.prediction_type.is_none());
    }

    #[test]
    fn test_region_cell_numeric_code() {
        let cell: RegionCellAttributes = serde_json::from_value(json!({
            "ADFG": 625831,
            "test": "Priority",
            "image_title": "<b>625831</b>"
        }))
        .unwrap();
        assert_eq!(cell.region.as_str(), "625831");
        assert_eq!(cell.test.as_deref(), Some("Priority"));
        assert!(cell.image.is_none());
    }
}
