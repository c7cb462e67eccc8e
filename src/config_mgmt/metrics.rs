use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::input::{type_name, Payload};
use super::models::{Configuration, ConfigurationMetrics};
use super::ConfigError;
use crate::constants::keys;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricType {
    System,
    User,
}

impl MetricType {
    fn select<'a>(&self, config: &'a Configuration) -> Option<&'a ConfigurationMetrics> {
        match self {
            MetricType::System => config.system_metrics.as_ref(),
            MetricType::User => config.metrics.as_ref(),
        }
    }

    fn wire_key(&self) -> &'static str {
        match self {
            MetricType::System => keys::SYSTEM_METRICS,
            MetricType::User => keys::METRICS,
        }
    }
}

impl FromStr for MetricType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(MetricType::System),
            "user" => Ok(MetricType::User),
            other => Err(ConfigError::InvalidMetricType(other.to_string())),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::System => f.write_str("system"),
            MetricType::User => f.write_str("user"),
        }
    }
}

/// Parses an optional metrics argument into the metrics sent on create.
/// Query strings are kept verbatim; no argument gives empty metrics.
pub(super) fn parse_metrics(raw: Option<&str>) -> Result<ConfigurationMetrics, ConfigError> {
    let Some(raw) = raw else {
        return Ok(ConfigurationMetrics::default());
    };

    let mut metrics = Payload::resolve(raw, keys::METRICS, keys::METRICS)?.into_inner();
    let queries = match metrics.remove(keys::QUERIES) {
        Some(Value::Object(queries)) => queries,
        Some(other) => {
            return Err(ConfigError::InputFormat(format!(
                "Property '{}' of argument 'metrics' must be a JSON object, got {}",
                keys::QUERIES,
                type_name(&other)
            )))
        }
        None => {
            return Err(ConfigError::InvalidArgument(format!(
                "metrics json must include the '{}' property",
                keys::QUERIES
            )))
        }
    };

    let queries = queries
        .into_iter()
        .map(|(name, query)| match query {
            Value::String(query) => Ok((name, query)),
            other => Err(ConfigError::InputFormat(format!(
                "Query for metric '{name}' must be a string, got {}",
                type_name(&other)
            ))),
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    log::debug!("Parsed {} metric queries", queries.len());

    Ok(ConfigurationMetrics {
        results: None,
        queries: Some(queries),
    })
}

/// Looks up the stored query for `metric_id` in the selected metric set.
pub(super) fn metric_query<'a>(
    config: &'a Configuration,
    metric_type: MetricType,
    metric_id: &str,
) -> Result<&'a str, ConfigError> {
    log::debug!("Looking up '{metric_id}' in {}", metric_type.wire_key());
    metric_type
        .select(config)
        .and_then(|metrics| metrics.query(metric_id))
        .ok_or_else(|| ConfigError::MetricNotFound {
            metric_id: metric_id.to_string(),
            metric_type,
        })
}
