use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use ureq::tls::{TlsConfig, TlsProvider};
use url::Url;

use crate::constants::{defaults, headers};
use crate::interfaces::settings::HubSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{method} {path} failed with status {status}: {message}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        message: String,
    },
    #[error("could not reach hub: {0}")]
    Transport(#[from] ureq::Error),
    #[error("could not decode hub response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid hub url: {0}")]
    Url(#[from] url::ParseError),
}

/// A request against the hub, relative to the hub root.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ServiceRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl ServiceResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body,
        }
    }

    #[cfg(test)]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, ServiceError> {
        serde_json::from_value(self.body).map_err(Into::into)
    }
}

/// Percent-encodes one path segment, leaving only unreserved characters as-is.
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for &byte in segment.as_bytes() {
        if matches!(byte, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Sends one request to the hub. Non-2xx responses are errors.
pub trait ServiceClient {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, ServiceError>;
}

pub struct HubClient {
    agent: ureq::Agent,
    base_url: String,
    auth_token: Option<String>,
}

impl HubClient {
    pub fn new(settings: &HubSettings) -> Result<Self, ServiceError> {
        let base_url = settings.hub_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(defaults::API_REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .provider(TlsProvider::NativeTls)
                    .build(),
            )
            .build()
            .into();

        Ok(Self {
            agent,
            base_url,
            auth_token: settings.auth_token.clone(),
        })
    }

    fn request_url(&self, request: &ServiceRequest) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("api-version", defaults::API_VERSION);
        }
        Ok(url)
    }

    fn apply_headers<B>(
        &self,
        mut builder: ureq::RequestBuilder<B>,
        request: &ServiceRequest,
    ) -> ureq::RequestBuilder<B> {
        if let Some(token) = &self.auth_token {
            builder = builder.header(headers::AUTHORIZATION, token.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

impl ServiceClient for HubClient {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        let url = self.request_url(&request)?;
        log::debug!("{} {}", request.method, url);

        let mut response = match request.method {
            Method::Get => self
                .apply_headers(self.agent.get(url.as_str()), &request)
                .call()?,
            Method::Delete => self
                .apply_headers(self.agent.delete(url.as_str()), &request)
                .call()?,
            Method::Put | Method::Post => {
                let builder = if request.method == Method::Put {
                    self.agent.put(url.as_str())
                } else {
                    self.agent.post(url.as_str())
                };
                let builder = self.apply_headers(builder, &request);
                match &request.body {
                    Some(body) => builder.send_json(body)?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let text = response.body_mut().read_to_string()?;
        log::debug!("Response status {status}");

        if !(200..300).contains(&status) {
            return Err(ServiceError::Status {
                method: request.method,
                path: request.path,
                status,
                message: error_message(&text),
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(ServiceResponse {
            status,
            headers,
            body,
        })
    }
}

// The hub reports failures as {"Message": "..."}; fall back to the raw text.
fn error_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| {
            ["Message", "message"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| text.trim().to_string())
}
