//! Test suites and the cases they group.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::record::{parse_list, Fields};
use crate::records::Case;
use crate::transport::Transport;

/// A test suite inside a project.
#[derive(Debug, Clone)]
pub struct Suite {
    transport: Arc<dyn Transport>,
    id: u64,
    name: String,
    description: Option<String>,
    project_id: u64,
}

impl Suite {
    pub(crate) const ENTITY: &'static str = "suite";

    pub fn from_json(transport: Arc<dyn Transport>, value: &Value) -> Result<Self, ApiError> {
        let fields = Fields::from_value(Self::ENTITY, value)?;
        Ok(Self {
            id: fields.required("id")?,
            description: fields.required("description")?,
            project_id: fields.required("project_id")?,
            name: fields.required("name")?,
            transport,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    /// Cases of this suite. The server expects the suite filter glued onto
    /// the path with `&`, not as a separate query string.
    pub fn get_cases(&self) -> Result<Vec<Case>, ApiError> {
        let path = format!("get_cases/{}&suite_id={}", self.project_id, self.id);
        let response = self.transport.send(HttpMethod::Get, &path, None)?;
        parse_list(&self.transport, Case::ENTITY, response, Case::from_json)
    }
}
