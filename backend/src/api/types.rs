//! REST API response types.
//!
//! Operation endpoints answer in plain text; only the health check is JSON.

use serde::{Deserialize, Serialize};

use crate::models::Operation;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "ok" when the server answers
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
    /// Accepted upload formats (file extensions, uppercased)
    pub formats: Vec<String>,
}

/// One operation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    pub operation: Operation,
    pub route: String,
    pub description: String,
}

impl EndpointInfo {
    pub fn for_operation(operation: Operation) -> Self {
        Self {
            operation,
            route: format!("POST /{}", operation.name()),
            description: operation.description().to_string(),
        }
    }
}

impl HealthResponse {
    pub fn new(formats: Vec<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: "matrixops".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: Operation::ALL
                .iter()
                .map(|&op| EndpointInfo::for_operation(op))
                .collect(),
            formats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_lists_every_operation() {
        let health = HealthResponse::new(vec!["CSV".into()]);
        let json = serde_json::to_value(&health).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["endpoints"].as_array().unwrap().len(), 5);
        assert_eq!(json["endpoints"][1]["operation"], "transpose");
        assert_eq!(json["endpoints"][1]["route"], "POST /transpose");
        assert_eq!(json["formats"][0], "CSV");
    }
}
