//! TestRail projects and their suite and run listings.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::record::{parse_list, Fields};
use crate::records::{Run, Suite};
use crate::transport::Transport;

/// A TestRail project, the root of the suite and run hierarchies.
#[derive(Debug, Clone)]
pub struct Project {
    transport: Arc<dyn Transport>,
    id: u64,
    name: String,
    announcement: Option<String>,
    is_completed: bool,
    completed_on: Option<i64>,
    show_announcement: bool,
}

impl Project {
    pub(crate) const ENTITY: &'static str = "project";

    pub fn from_json(transport: Arc<dyn Transport>, value: &Value) -> Result<Self, ApiError> {
        let fields = Fields::from_value(Self::ENTITY, value)?;
        Ok(Self {
            id: fields.required("id")?,
            announcement: fields.required("announcement")?,
            completed_on: fields.required("completed_on")?,
            is_completed: fields.required("is_completed")?,
            show_announcement: fields.required("show_announcement")?,
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

    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Unix timestamp of completion, `None` while the project is active.
    pub fn completed_on(&self) -> Option<i64> {
        self.completed_on
    }

    pub fn show_announcement(&self) -> bool {
        self.show_announcement
    }

    pub fn get_suites(&self) -> Result<Vec<Suite>, ApiError> {
        let response = self
            .transport
            .send(HttpMethod::Get, &format!("get_suites/{}", self.id), None)?;
        parse_list(&self.transport, Suite::ENTITY, response, Suite::from_json)
    }

    pub fn get_runs(&self) -> Result<Vec<Run>, ApiError> {
        let response = self
            .transport
            .send(HttpMethod::Get, &format!("get_runs/{}", self.id), None)?;
        parse_list(&self.transport, Run::ENTITY, response, Run::from_json)
    }
}
