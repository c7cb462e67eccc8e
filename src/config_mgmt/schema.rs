use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ConfigError;

const EDGE_DEPLOYMENT_SCHEMA: &str =
    include_str!("../../resources/schema/edge-deployment.schema.json");

static EDGE_SCHEMA: Lazy<Result<JSONSchema, String>> = Lazy::new(|| {
    let schema_doc: Value =
        serde_json::from_str(EDGE_DEPLOYMENT_SCHEMA).map_err(|e| e.to_string())?;
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema_doc)
        .map_err(|e| e.to_string())
});

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaViolation {
    pub description: String,
    pub content_path: String,
    pub schema_path: String,
}

pub(super) fn render_violations(violations: &[SchemaViolation]) -> String {
    json!({ "validationErrors": violations }).to_string()
}

/// Validates a `{"modulesContent": {...}}` document against the edge
/// deployment schema, collecting every violation.
pub(super) fn validate_edge_content(document: &Value) -> Result<(), ConfigError> {
    let schema = EDGE_SCHEMA
        .as_ref()
        .map_err(|e| ConfigError::Schema(e.clone()))?;

    let violations: Vec<SchemaViolation> = match schema.validate(document) {
        Ok(()) => return Ok(()),
        Err(errors) => errors
            .map(|e| SchemaViolation {
                description: e.to_string(),
                content_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
            })
            .collect(),
    };

    log::debug!("Edge deployment failed schema validation with {} errors", violations.len());
    Err(ConfigError::SchemaValidation(violations))
}
