//! Decoding of MapServer `query` responses.
//!
//! With `f=geojson` the service answers with a GeoJSON FeatureCollection.
//! A truncated page carries `exceededTransferLimit: true`, either at the top
//! level or inside a top-level `properties` object depending on the server
//! version. Query errors come back with HTTP 200 and an `error` object.

use ice_common::{Feature, FeatureCollection, IceAttributes};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{FetchError, Result};

/// One page of a layer query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    pub features: Vec<Feature<IceAttributes>>,
    pub exceeded_transfer_limit: bool,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

fn transfer_limit_flag(doc: &Value) -> bool {
    let flag = |v: &Value| v.get("exceededTransferLimit").and_then(Value::as_bool);
    flag(doc)
        .or_else(|| doc.get("properties").and_then(flag))
        .unwrap_or(false)
}

/// Parse one page of a query response body.
pub fn parse_query_page(body: &str) -> Result<QueryPage> {
    let doc: Value = serde_json::from_str(body)?;

    if let Some(error) = doc.get("error") {
        let error: ServiceError = serde_json::from_value(error.clone())?;
        return Err(FetchError::Service {
            code: error.code,
            message: error.message,
        });
    }

    let exceeded_transfer_limit = transfer_limit_flag(&doc);
    let collection: FeatureCollection<IceAttributes> =
        FeatureCollection::from_geojson_str(body)?;

    Ok(QueryPage {
        features: collection.features,
        exceeded_transfer_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{ARCGIS_ERROR_JSON, CONCENTRATION_GEOJSON};

    #[test]
    fn test_parse_concentration_page() {
        let page = parse_query_page(CONCENTRATION_GEOJSON).unwrap();
        assert_eq!(page.features.len(), 2);
        assert!(!page.exceeded_transfer_limit);
        assert_eq!(page.features[1].properties.ct.as_deref(), Some("00"));
    }

    #[test]
    fn test_error_payload_is_service_error() {
        match parse_query_page(ARCGIS_ERROR_JSON) {
            Err(FetchError::Service { code, message }) => {
                assert_eq!(code, 400);
                assert!(message.contains("Invalid"));
            }
            other => panic!("Expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        assert!(matches!(
            parse_query_page("<html>Service Unavailable</html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_wrong_document_type_is_decode_error() {
        let body = r#"{"type": "Feature", "features": []}"#;
        assert!(matches!(parse_query_page(body), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_transfer_limit_in_properties() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [],
            "properties": {"exceededTransferLimit": true}
        }"#;
        assert!(parse_query_page(body).unwrap().exceeded_transfer_limit);
    }

    #[test]
    fn test_transfer_limit_top_level() {
        let body = r#"{"type": "FeatureCollection", "features": [], "exceededTransferLimit": true}"#;
        assert!(parse_query_page(body).unwrap().exceeded_transfer_limit);
    }
}
