//! Test case definitions.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::record::Fields;
use crate::transport::Transport;

/// A test case: the reusable definition that runs instantiate as tests.
///
/// `custom_steps`, `custom_preconds` and `custom_expected` belong to the
/// default case template and are read as ordinary required fields. Cases
/// have no outgoing navigation, so no transport handle is kept.
#[derive(Debug, Clone)]
pub struct Case {
    id: u64,
    title: String,
    suite_id: u64,
    section_id: u64,
    type_id: u64,
    priority_id: u64,
    milestone_id: Option<u64>,
    refs: Option<String>,
    created_by: u64,
    created_on: i64,
    updated_by: u64,
    updated_on: i64,
    estimate: Option<String>,
    estimate_forecast: Option<String>,
    custom_steps: Option<String>,
    custom_preconds: Option<String>,
    custom_expected: Option<String>,
}

impl Case {
    pub(crate) const ENTITY: &'static str = "case";

    pub fn from_json(_transport: Arc<dyn Transport>, value: &Value) -> Result<Self, ApiError> {
        let fields = Fields::from_value(Self::ENTITY, value)?;
        Ok(Self {
            id: fields.required("id")?,
            custom_steps: fields.required("custom_steps")?,
            updated_by: fields.required("updated_by")?,
            type_id: fields.required("type_id")?,
            estimate: fields.required("estimate")?,
            refs: fields.required("refs")?,
            priority_id: fields.required("priority_id")?,
            section_id: fields.required("section_id")?,
            created_by: fields.required("created_by")?,
            custom_preconds: fields.required("custom_preconds")?,
            created_on: fields.required("created_on")?,
            custom_expected: fields.required("custom_expected")?,
            suite_id: fields.required("suite_id")?,
            updated_on: fields.required("updated_on")?,
            title: fields.required("title")?,
            milestone_id: fields.required("milestone_id")?,
            estimate_forecast: fields.required("estimate_forecast")?,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn suite_id(&self) -> u64 {
        self.suite_id
    }

    pub fn section_id(&self) -> u64 {
        self.section_id
    }

    pub fn type_id(&self) -> u64 {
        self.type_id
    }

    pub fn priority_id(&self) -> u64 {
        self.priority_id
    }

    pub fn milestone_id(&self) -> Option<u64> {
        self.milestone_id
    }

    pub fn refs(&self) -> Option<&str> {
        self.refs.as_deref()
    }

    pub fn created_by(&self) -> u64 {
        self.created_by
    }

    pub fn created_on(&self) -> i64 {
        self.created_on
    }

    pub fn updated_by(&self) -> u64 {
        self.updated_by
    }

    pub fn updated_on(&self) -> i64 {
        self.updated_on
    }

    /// Estimated duration as TestRail formats it, e.g. `"30s"` or `"1m 45s"`.
    pub fn estimate(&self) -> Option<&str> {
        self.estimate.as_deref()
    }

    pub fn estimate_forecast(&self) -> Option<&str> {
        self.estimate_forecast.as_deref()
    }

    pub fn custom_steps(&self) -> Option<&str> {
        self.custom_steps.as_deref()
    }

    pub fn custom_preconds(&self) -> Option<&str> {
        self.custom_preconds.as_deref()
    }

    pub fn custom_expected(&self) -> Option<&str> {
        self.custom_expected.as_deref()
    }
}
