use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::models::Labels;
use super::ConfigError;
use crate::constants::keys;

/// Where the JSON text of a payload argument comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum PayloadSource {
    FilePath(PathBuf),
    Inline(String),
}

impl PayloadSource {
    pub fn from_arg(raw: &str) -> Self {
        let path = Path::new(raw);
        if path.is_file() {
            PayloadSource::FilePath(path.to_path_buf())
        } else {
            PayloadSource::Inline(raw.to_string())
        }
    }

    /// Reads and parses the payload, which must be a JSON object.
    pub fn load(&self, argument: &str) -> Result<Map<String, Value>, ConfigError> {
        let value: Value = match self {
            PayloadSource::FilePath(path) => {
                log::debug!("Reading '{argument}' from {}", path.display());
                let text = fs::read_to_string(path).map_err(|e| {
                    ConfigError::InputFormat(format!(
                        "Could not read file '{}' for argument '{argument}': {e}",
                        path.display()
                    ))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    ConfigError::InputFormat(format!(
                        "Failed to parse JSON from file '{}' for argument '{argument}': {e}",
                        path.display()
                    ))
                })?
            }
            PayloadSource::Inline(text) => serde_json::from_str(text).map_err(|e| {
                if looks_like_path(text) {
                    ConfigError::InputFormat(format!(
                        "JSON file '{text}' for argument '{argument}' does not exist"
                    ))
                } else {
                    ConfigError::InputFormat(format!(
                        "Failed to parse JSON for argument '{argument}': {e}"
                    ))
                }
            })?,
        };

        match value {
            Value::Object(object) => Ok(object),
            other => Err(ConfigError::InputFormat(format!(
                "Argument '{argument}' must be a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }
}

fn looks_like_path(text: &str) -> bool {
    let text = text.trim();
    !text.starts_with(['{', '[', '"']) && text.ends_with(".json")
}

pub(super) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A payload object, tagged by whether its inner object came wrapped under
/// its key (`{"content": {...}}`) or bare.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Document {
        inner: Map<String, Value>,
        outer: Map<String, Value>,
    },
    Fragment(Map<String, Value>),
}

impl Payload {
    pub fn resolve(raw: &str, argument: &str, wrapper_key: &str) -> Result<Self, ConfigError> {
        let object = PayloadSource::from_arg(raw).load(argument)?;
        Self::from_object(object, argument, wrapper_key)
    }

    pub fn from_object(
        mut object: Map<String, Value>,
        argument: &str,
        wrapper_key: &str,
    ) -> Result<Self, ConfigError> {
        match object.remove(wrapper_key) {
            Some(Value::Object(inner)) => Ok(Payload::Document {
                inner,
                outer: object,
            }),
            Some(other) => Err(ConfigError::InputFormat(format!(
                "Property '{wrapper_key}' of argument '{argument}' must be a JSON object, got {}",
                type_name(&other)
            ))),
            None => Ok(Payload::Fragment(object)),
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        match self {
            Payload::Document { inner, .. } => inner,
            Payload::Fragment(inner) => inner,
        }
    }
}

/// Configuration content plus the outer fields a full document may carry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedContent {
    pub content: Map<String, Value>,
    pub target_condition: Option<String>,
    pub priority: Option<i64>,
    pub labels: Option<Labels>,
}

impl NormalizedContent {
    pub fn from_arg(raw: &str) -> Result<Self, ConfigError> {
        Self::from_payload(Payload::resolve(raw, keys::CONTENT, keys::CONTENT)?)
    }

    pub fn from_payload(payload: Payload) -> Result<Self, ConfigError> {
        match payload {
            Payload::Fragment(content) => {
                log::debug!("Content given as bare content object");
                Ok(Self {
                    content,
                    ..Default::default()
                })
            }
            Payload::Document { inner, outer } => {
                log::debug!("Content given as full configuration document");
                let target_condition = match present(&outer, keys::TARGET_CONDITION) {
                    Some(Value::String(condition)) => Some(condition.clone()),
                    Some(other) => return Err(wrong_type(keys::TARGET_CONDITION, "a string", other)),
                    None => None,
                };
                let priority = match present(&outer, keys::PRIORITY) {
                    Some(value) => Some(
                        value
                            .as_i64()
                            .ok_or_else(|| wrong_type(keys::PRIORITY, "an integer", value))?,
                    ),
                    None => None,
                };
                let labels = present(&outer, keys::LABELS)
                    .map(labels_from_value)
                    .transpose()?;

                Ok(Self {
                    content: inner,
                    target_condition,
                    priority,
                    labels,
                })
            }
        }
    }
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn wrong_type(key: &str, expected: &str, value: &Value) -> ConfigError {
    ConfigError::InputFormat(format!(
        "Property '{key}' must be {expected}, got {}",
        type_name(value)
    ))
}

fn labels_from_value(value: &Value) -> Result<Labels, ConfigError> {
    let object = value
        .as_object()
        .ok_or_else(|| wrong_type(keys::LABELS, "an object", value))?;
    object
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k.clone(), s.clone())),
            other => Err(ConfigError::InputFormat(format!(
                "Label '{k}' must be a string, got {}",
                type_name(other)
            ))),
        })
        .collect()
}

/// Parses a labels argument: a JSON object of strings, inline or from a file.
pub fn parse_labels(raw: &str) -> Result<Labels, ConfigError> {
    let object = PayloadSource::from_arg(raw).load(keys::LABELS)?;
    labels_from_value(&Value::Object(object))
}
