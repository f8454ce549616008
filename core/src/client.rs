//! Entry point for talking to a TestRail instance.
//!
//! # Design
//! `Client` owns the transport behind an `Arc` and hands clones of it to every
//! record it builds, so navigation calls (`project.get_suites()`, ...) reuse
//! the same connection settings and credentials. The transport type is a
//! generic parameter defaulting to `HttpTransport`; tests plug in a fake.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{ClientConfig, Credentials};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::record::parse_list;
use crate::records::{Project, Status};
use crate::transport::{HttpTransport, Transport};

/// Synchronous TestRail API v2 client.
///
/// Every call blocks until the full response has been read.
#[derive(Debug)]
pub struct Client<T: Transport = HttpTransport> {
    transport: Arc<T>,
}

impl Client<HttpTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(config)))
    }

    /// Replace the credentials for all later calls, including navigation
    /// calls made from records fetched earlier.
    pub fn set_credentials(&self, user: impl Into<String>, password: impl Into<String>) {
        self.transport.set_credentials(Credentials::new(user, password));
    }
}

impl<T: Transport + 'static> Client<T> {
    pub fn with_transport(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    fn handle(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// Raw GET against any API method, e.g. `get_case/1`.
    pub fn send_get(&self, path: &str) -> Result<Value, ApiError> {
        self.transport.send(HttpMethod::Get, path, None)
    }

    /// Raw POST against any API method, e.g. `add_case/1`.
    pub fn send_post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.transport.send(HttpMethod::Post, path, Some(body))
    }

    pub fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let response = self.send_get("get_projects")?;
        parse_list(&self.handle(), Project::ENTITY, response, Project::from_json)
    }

    pub fn get_statuses(&self) -> Result<Vec<Status>, ApiError> {
        let response = self.send_get("get_statuses")?;
        parse_list(&self.handle(), Status::ENTITY, response, Status::from_json)
    }
}

impl<T: Transport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}
