//! Configuration payload handling for automatic device configurations and
//! edge deployments: input normalization, content validation, metrics and
//! the hub operations built on top of them.

mod assemble;
mod content;
mod input;
mod metrics;
mod schema;

pub mod models;
pub mod operations;

use thiserror::Error;

use crate::interfaces::ServiceError;

pub use metrics::MetricType;
pub use models::ConfigKind;
pub use schema::SchemaViolation;

pub const ADM_MISSING_CONTENT: &str =
    "Automatic device configuration payloads require property: deviceContent or moduleContent";
pub const EDGE_MISSING_CONTENT: &str =
    "Edge deployment payloads require property: modulesContent";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    InputFormat(String),
    #[error("{}", schema::render_violations(.0))]
    SchemaValidation(Vec<SchemaViolation>),
    #[error("{0}")]
    MissingContent(String),
    #[error("metric '{metric_id}' not found in {metric_type} metrics")]
    MetricNotFound {
        metric_id: String,
        metric_type: MetricType,
    },
    #[error("metric type must be one of 'system', 'user'; got '{0}'")]
    InvalidMetricType(String),
    #[error("invalid request, configuration etag is missing")]
    MissingEtag,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("could not encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("edge deployment schema is unusable: {0}")]
    Schema(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
