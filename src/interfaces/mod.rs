mod http_api;
pub mod settings;
pub mod settings_store;

#[cfg(test)]
pub mod recording_client;

pub use http_api::{encode_path_segment, HubClient, ServiceClient, ServiceError, ServiceRequest, ServiceResponse};
#[cfg(test)]
pub use http_api::Method;
pub use settings::HubSettings;
