//! Hub operations on configurations. Every operation takes the service client
//! explicitly and issues one synchronous request at a time.

use serde_json::{json, Map, Value};

use super::assemble::{assemble, Draft};
use super::content::{classify, SchemaCheck};
use super::input::{parse_labels, NormalizedContent, PayloadSource};
use super::metrics::{metric_query, parse_metrics, MetricType};
use super::models::{ConfigKind, Configuration, ConfigurationMetrics, MetricReport};
use super::ConfigError;
use crate::constants::{defaults, headers};
use crate::interfaces::{encode_path_segment, ServiceClient, ServiceRequest, ServiceResponse};

const QUERY_PATH: &str = "/devices/query";

// Dot segments would be resolved away by URL parsing even when encoded.
fn id_segment(id: &str) -> Result<String, ConfigError> {
    if matches!(id, "" | "." | "..") {
        return Err(ConfigError::InvalidArgument(format!(
            "'{id}' is not a valid identifier"
        )));
    }
    Ok(encode_path_segment(id))
}

// Configuration ids are stored lower-cased by the hub.
fn configuration_path(config_id: &str) -> Result<String, ConfigError> {
    Ok(format!("/configurations/{}", id_segment(&config_id.to_lowercase())?))
}

fn device_path(device_id: &str, resource: &str) -> Result<String, ConfigError> {
    Ok(format!("/devices/{}/{resource}", id_segment(device_id)?))
}

fn if_match(etag: &str) -> String {
    format!("\"{etag}\"")
}

// Mutations may answer with an empty body; fall back to what was sent.
fn configuration_from(response: ServiceResponse, sent: Configuration) -> Result<Configuration, ConfigError> {
    if response.body.is_null() {
        return Ok(sent);
    }
    Ok(response.json()?)
}

/// Arguments of a create call, as given on the command line.
#[derive(Clone, Debug, Default)]
pub struct CreateRequest {
    pub config_id: String,
    pub content: String,
    pub target_condition: Option<String>,
    pub priority: Option<i64>,
    pub labels: Option<String>,
    pub metrics: Option<String>,
    pub layered: bool,
    pub no_validation: bool,
}

pub fn create(
    client: &dyn ServiceClient,
    kind: ConfigKind,
    request: CreateRequest,
) -> Result<Configuration, ConfigError> {
    let normalized = NormalizedContent::from_arg(&request.content)?;
    let schema_check = if request.layered || request.no_validation {
        SchemaCheck::Skip
    } else {
        SchemaCheck::Enforce
    };
    let content = classify(kind, normalized.content, schema_check)?;

    let labels = match request.labels.as_deref() {
        Some(raw) => Some(parse_labels(raw)?),
        None => normalized.labels,
    };
    let metrics = parse_metrics(request.metrics.as_deref())?;

    let config = assemble(
        &request.config_id,
        Draft {
            content,
            target_condition: request.target_condition.or(normalized.target_condition),
            priority: request.priority.or(normalized.priority),
            labels,
            metrics,
            etag: None,
        },
    );

    log::info!("Creating {kind} '{}'", config.id);
    let body = serde_json::to_value(&config)?;
    let response = client.send(ServiceRequest::put(configuration_path(&config.id)?, body))?;
    configuration_from(response, config)
}

pub fn show(client: &dyn ServiceClient, config_id: &str) -> Result<Configuration, ConfigError> {
    let response = client.send(ServiceRequest::get(configuration_path(config_id)?))?;
    Ok(response.json()?)
}

/// Replaces a configuration's mutable fields with those in `parameters`, a
/// full configuration document such as `show` returns.
pub fn update(
    client: &dyn ServiceClient,
    kind: ConfigKind,
    config_id: &str,
    parameters: &str,
    etag: Option<&str>,
) -> Result<Configuration, ConfigError> {
    let parameters = PayloadSource::from_arg(parameters).load("parameters")?;
    let parameters: Configuration = serde_json::from_value(Value::Object(parameters))
        .map_err(|e| ConfigError::InputFormat(format!("Invalid configuration parameters: {e}")))?;

    let etag = etag
        .map(str::to_string)
        .or(parameters.etag)
        .filter(|etag| !etag.is_empty())
        .ok_or(ConfigError::MissingEtag)?;

    let content = match serde_json::to_value(parameters.content.unwrap_or_default())? {
        Value::Object(content) => content,
        _ => Map::new(),
    };
    let content = classify(kind, content, SchemaCheck::Skip)?;
    let metrics = ConfigurationMetrics {
        results: None,
        queries: parameters.metrics.and_then(|m| m.queries),
    };

    let config = assemble(
        config_id,
        Draft {
            content,
            target_condition: parameters.target_condition,
            priority: parameters.priority,
            labels: parameters.labels,
            metrics,
            etag: Some(etag.clone()),
        },
    );

    log::info!("Updating {kind} '{}'", config.id);
    let body = serde_json::to_value(&config)?;
    let response = client.send(
        ServiceRequest::put(configuration_path(&config.id)?, body)
            .with_header(headers::IF_MATCH, if_match(&etag)),
    )?;
    configuration_from(response, config)
}

/// Deletes a configuration. Without an explicit etag the current one is read
/// from the hub first.
pub fn delete(
    client: &dyn ServiceClient,
    config_id: &str,
    etag: Option<&str>,
) -> Result<(), ConfigError> {
    let etag = match etag.filter(|etag| !etag.is_empty()) {
        Some(etag) => etag.to_string(),
        None => show(client, config_id)?
            .etag
            .filter(|etag| !etag.is_empty())
            .ok_or(ConfigError::MissingEtag)?,
    };

    client.send(
        ServiceRequest::delete(configuration_path(config_id)?)
            .with_header(headers::IF_MATCH, if_match(&etag)),
    )?;
    log::info!("Deleted configuration '{config_id}'");
    Ok(())
}

pub fn list(
    client: &dyn ServiceClient,
    kind: ConfigKind,
    top: Option<i64>,
) -> Result<Vec<Configuration>, ConfigError> {
    let top = top.unwrap_or(defaults::LIST_TOP);
    if top <= 0 {
        return Err(ConfigError::InvalidArgument(
            "top must be a positive integer".to_string(),
        ));
    }

    let response = client.send(ServiceRequest::get("/configurations").with_query("top", top.to_string()))?;
    let configurations: Vec<Configuration> = response.json()?;
    Ok(configurations
        .into_iter()
        .filter(|config| kind.matches(config.content.as_ref()))
        .take(top as usize)
        .collect())
}

/// Reads a configuration, finds the query behind one of its metrics and runs
/// it against the hub.
pub fn metric_show(
    client: &dyn ServiceClient,
    config_id: &str,
    metric_id: &str,
    metric_type: &str,
) -> Result<MetricReport, ConfigError> {
    let metric_type: MetricType = metric_type.parse()?;
    let config = show(client, config_id)?;
    let query_text = metric_query(&config, metric_type, metric_id)?.to_string();
    let result = query(client, &query_text, None)?;

    Ok(MetricReport {
        metric: metric_id.to_string(),
        query: query_text,
        result,
    })
}

/// Runs a hub query, following continuation tokens until exhausted or `top`
/// results are collected.
pub fn query(
    client: &dyn ServiceClient,
    query_text: &str,
    top: Option<usize>,
) -> Result<Vec<Value>, ConfigError> {
    if top == Some(0) {
        return Err(ConfigError::InvalidArgument(
            "top must be a positive integer".to_string(),
        ));
    }

    let mut results: Vec<Value> = Vec::new();
    let mut continuation: Option<String> = None;
    loop {
        let page_size = match top {
            Some(top) => (top - results.len()).min(defaults::QUERY_PAGE_SIZE),
            None => defaults::QUERY_PAGE_SIZE,
        };
        let mut request = ServiceRequest::post(QUERY_PATH, json!({ "query": query_text }))
            .with_header(headers::MAX_ITEM_COUNT, page_size.to_string());
        if let Some(token) = continuation.take() {
            request = request.with_header(headers::CONTINUATION, token);
        }

        let response = client.send(request)?;
        continuation = response
            .header(headers::CONTINUATION)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        if !response.body.is_null() {
            results.extend(response.json::<Vec<Value>>()?);
        }

        if let Some(top) = top {
            if results.len() >= top {
                results.truncate(top);
                break;
            }
        }
        if continuation.is_none() {
            break;
        }
        log::debug!("Following query continuation after {} results", results.len());
    }
    Ok(results)
}

/// Applies edge content directly to one device and returns its modules.
pub fn set_modules(
    client: &dyn ServiceClient,
    device_id: &str,
    content: &str,
) -> Result<Vec<Value>, ConfigError> {
    let apply_path = device_path(device_id, "applyConfigurationContent")?;
    let modules_path = device_path(device_id, "modules")?;
    let normalized = NormalizedContent::from_arg(content)?;
    let content = classify(ConfigKind::Edge, normalized.content, SchemaCheck::Enforce)?;

    log::info!("Applying modules content to device '{device_id}'");
    client.send(ServiceRequest::post(apply_path, serde_json::to_value(&content)?))?;

    let response = client.send(ServiceRequest::get(modules_path))?;
    Ok(response.json()?)
}
