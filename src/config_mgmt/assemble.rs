use super::models::{Configuration, ConfigurationContent, ConfigurationMetrics, Labels};

const SCHEMA_VERSION: &str = "2.0";
const CONTENT_TYPE: &str = "assignment";
const CREATE_ETAG: &str = "*";

/// Everything that goes into a configuration body apart from its id.
#[derive(Clone, Debug, Default)]
pub(super) struct Draft {
    pub content: ConfigurationContent,
    pub target_condition: Option<String>,
    pub priority: Option<i64>,
    pub labels: Option<Labels>,
    pub metrics: ConfigurationMetrics,
    pub etag: Option<String>,
}

/// Builds the outgoing configuration document. Absent optional fields are
/// left out of the serialized body; metrics are always present.
pub(super) fn assemble(id: &str, draft: Draft) -> Configuration {
    Configuration {
        id: id.to_lowercase(),
        schema_version: Some(SCHEMA_VERSION.to_string()),
        labels: draft.labels,
        content: Some(draft.content),
        content_type: Some(CONTENT_TYPE.to_string()),
        target_condition: draft.target_condition,
        priority: draft.priority,
        metrics: Some(draft.metrics),
        etag: Some(draft.etag.unwrap_or_else(|| CREATE_ETAG.to_string())),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn assembled_body_omits_absent_fields() {
        let mut modules = Map::new();
        modules.insert("$edgeAgent".to_string(), json!({}));
        let draft = Draft {
            content: ConfigurationContent {
                modules_content: Some(modules),
                ..Default::default()
            },
            ..Default::default()
        };

        let body = serde_json::to_value(assemble("MixedCaseId", draft)).unwrap();
        assert_eq!(
            body,
            json!({
                "id": "mixedcaseid",
                "schemaVersion": "2.0",
                "content": {"modulesContent": {"$edgeAgent": {}}},
                "contentType": "assignment",
                "metrics": {},
                "etag": "*"
            })
        );
    }

    #[test]
    fn assembled_body_carries_optional_fields() {
        let draft = Draft {
            target_condition: Some("tags.building=43".to_string()),
            priority: Some(3),
            labels: Some(Labels::from([("key1".to_string(), "value1".to_string())])),
            etag: Some("AAAA".to_string()),
            ..Default::default()
        };

        let body = serde_json::to_value(assemble("UPPERCASEID", draft)).unwrap();
        assert_eq!(body["id"], "uppercaseid");
        assert_eq!(body["targetCondition"], "tags.building=43");
        assert_eq!(body["priority"], 3);
        assert_eq!(body["labels"], json!({"key1": "value1"}));
        assert_eq!(body["etag"], "AAAA");
    }
}
