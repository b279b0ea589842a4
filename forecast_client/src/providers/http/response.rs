use serde::Deserialize;
use serde_json::Value;

use crate::models::catalog::{Catalog, Instrument};

#[derive(Deserialize, Debug)]
pub struct CatalogResponse {
    pub symbols: Vec<Instrument>,
}

impl From<CatalogResponse> for Catalog {
    fn from(response: CatalogResponse) -> Self {
        Catalog::from_instruments(response.symbols)
    }
}

#[derive(Deserialize, Debug)]
pub struct HealthResponse {
    pub message: String,
}

/// Error envelope. `detail` is a string for handled errors and a list of
/// field errors when request validation fails.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub detail: Value,
}

/// Best human-readable message out of an error response body.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "Unknown API error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_unwrapped() {
        assert_eq!(
            error_detail(r#"{"detail":"Error in analysis: No data found for symbol INVALID123"}"#),
            "Error in analysis: No data found for symbol INVALID123"
        );
    }

    #[test]
    fn structured_detail_is_kept_as_json() {
        let detail = error_detail(r#"{"detail":[{"loc":["body","symbol"],"msg":"field required"}]}"#);
        assert!(detail.contains("field required"));
    }

    #[test]
    fn non_json_bodies_fall_back() {
        assert_eq!(error_detail("  "), "Unknown API error");
        assert_eq!(error_detail("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn catalog_response_becomes_catalog() {
        let body = r#"{"symbols":[{"symbol":"AAPL","name":"Apple Inc."},{"symbol":"GOOGL","name":"Alphabet Inc."}]}"#;
        let catalog: Catalog = serde_json::from_str::<CatalogResponse>(body).unwrap().into();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("googl").unwrap().name, "Alphabet Inc.");
    }
}
