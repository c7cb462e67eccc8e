use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Labels = BTreeMap<String, String>;

/// A hub configuration as it travels on the wire.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ConfigurationContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time_utc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time_utc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_metrics: Option<ConfigurationMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ConfigurationMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_content: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_content: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_content: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ConfigurationMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<BTreeMap<String, String>>,
}

impl ConfigurationMetrics {
    pub fn query(&self, metric_id: &str) -> Option<&str> {
        self.queries
            .as_ref()
            .and_then(|q| q.get(metric_id))
            .map(String::as_str)
    }
}

/// The two families of configuration a hub stores side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKind {
    /// Automatic device management: `deviceContent` or `moduleContent`.
    Automatic,
    /// Edge deployment: `modulesContent`.
    Edge,
}

impl ConfigKind {
    /// Empty content objects count as absent.
    pub fn matches(&self, content: Option<&ConfigurationContent>) -> bool {
        let is_edge = content
            .and_then(|c| c.modules_content.as_ref())
            .is_some_and(|modules| !modules.is_empty());
        match self {
            ConfigKind::Edge => is_edge,
            ConfigKind::Automatic => !is_edge,
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKind::Automatic => f.write_str("automatic device configuration"),
            ConfigKind::Edge => f.write_str("edge deployment"),
        }
    }
}

/// Result of reading back one metric.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MetricReport {
    pub metric: String,
    pub query: String,
    pub result: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: Value) -> ConfigurationContent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn kind_ignores_empty_content_objects() {
        let adm = content(json!({"deviceContent": {"properties.desired.x": 1}, "modulesContent": {}}));
        assert!(ConfigKind::Automatic.matches(Some(&adm)));
        assert!(!ConfigKind::Edge.matches(Some(&adm)));

        let edge = content(json!({"modulesContent": {"$edgeAgent": {}}, "deviceContent": {}}));
        assert!(ConfigKind::Edge.matches(Some(&edge)));
        assert!(ConfigKind::Automatic.matches(None));
    }
}
