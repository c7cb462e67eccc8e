use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use super::{Method, ServiceClient, ServiceError, ServiceRequest, ServiceResponse};

/// Replays canned responses in order and records every request sent.
#[derive(Default)]
pub struct RecordingClient {
    responses: RefCell<VecDeque<Result<ServiceResponse, ServiceError>>>,
    requests: RefCell<Vec<ServiceRequest>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: ServiceResponse) -> Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn respond_json(self, body: Value) -> Self {
        self.respond(ServiceResponse::ok(body))
    }

    pub fn fail(self, status: u16) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ServiceError::Status {
                method: Method::Get,
                path: String::new(),
                status,
                message: "mocked failure".to_string(),
            }));
        self
    }

    pub fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> ServiceRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl ServiceClient for RecordingClient {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ServiceResponse::ok(Value::Null)))
    }
}
