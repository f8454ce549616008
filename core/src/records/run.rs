//! Test runs and the tests they contain.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::record::{parse_list, Fields};
use crate::records::Test;
use crate::transport::Transport;

/// A test run: one execution of a suite's cases, with per-status counters.
#[derive(Debug, Clone)]
pub struct Run {
    transport: Arc<dyn Transport>,
    id: u64,
    name: String,
    description: Option<String>,
    url: String,
    project_id: u64,
    suite_id: u64,
    plan_id: Option<u64>,
    milestone_id: Option<u64>,
    assignedto_id: Option<u64>,
    include_all: bool,
    is_completed: bool,
    completed_on: Option<i64>,
    created_on: i64,
    created_by: u64,
    passed_count: u64,
    blocked_count: u64,
    untested_count: u64,
    retest_count: u64,
    failed_count: u64,
    config: Option<String>,
    config_ids: Vec<u64>,
    custom: BTreeMap<String, Value>,
}

impl Run {
    pub(crate) const ENTITY: &'static str = "run";

    pub fn from_json(transport: Arc<dyn Transport>, value: &Value) -> Result<Self, ApiError> {
        let fields = Fields::from_value(Self::ENTITY, value)?;
        Ok(Self {
            id: fields.required("id")?,
            include_all: fields.required("include_all")?,
            is_completed: fields.required("is_completed")?,
            created_on: fields.required("created_on")?,
            retest_count: fields.required("retest_count")?,
            plan_id: fields.required("plan_id")?,
            created_by: fields.required("created_by")?,
            passed_count: fields.required("passed_count")?,
            project_id: fields.required("project_id")?,
            config: fields.required("config")?,
            failed_count: fields.required("failed_count")?,
            description: fields.required("description")?,
            suite_id: fields.required("suite_id")?,
            milestone_id: fields.required("milestone_id")?,
            name: fields.required("name")?,
            assignedto_id: fields.required("assignedto_id")?,
            blocked_count: fields.required("blocked_count")?,
            completed_on: fields.required("completed_on")?,
            config_ids: fields.required("config_ids")?,
            url: fields.required("url")?,
            untested_count: fields.required("untested_count")?,
            custom: fields.custom(),
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

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    pub fn suite_id(&self) -> u64 {
        self.suite_id
    }

    /// Owning test plan, if the run was created as part of one.
    pub fn plan_id(&self) -> Option<u64> {
        self.plan_id
    }

    pub fn milestone_id(&self) -> Option<u64> {
        self.milestone_id
    }

    pub fn assignedto_id(&self) -> Option<u64> {
        self.assignedto_id
    }

    pub fn include_all(&self) -> bool {
        self.include_all
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn completed_on(&self) -> Option<i64> {
        self.completed_on
    }

    pub fn created_on(&self) -> i64 {
        self.created_on
    }

    pub fn created_by(&self) -> u64 {
        self.created_by
    }

    pub fn passed_count(&self) -> u64 {
        self.passed_count
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked_count
    }

    pub fn untested_count(&self) -> u64 {
        self.untested_count
    }

    pub fn retest_count(&self) -> u64 {
        self.retest_count
    }

    pub fn failed_count(&self) -> u64 {
        self.failed_count
    }

    /// Configuration label for runs that belong to a plan entry.
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn config_ids(&self) -> &[u64] {
        &self.config_ids
    }

    /// `custom_*` keys of the payload with the prefix stripped, e.g. the
    /// counters of user-defined statuses (`status1_count`).
    pub fn custom(&self) -> &BTreeMap<String, Value> {
        &self.custom
    }

    pub fn get_tests(&self) -> Result<Vec<Test>, ApiError> {
        let response = self
            .transport
            .send(HttpMethod::Get, &format!("get_tests/{}", self.id), None)?;
        parse_list(&self.transport, Test::ENTITY, response, Test::from_json)
    }
}
