//! Fixtures and a recording transport for unit tests.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;

/// Answers every call with the same canned value and remembers what was asked.
#[derive(Debug)]
pub(crate) struct FakeTransport {
    response: Value,
    calls: Mutex<Vec<(HttpMethod, String, Option<Value>)>>,
}

impl FakeTransport {
    pub(crate) fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<(HttpMethod, String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// The single GET path issued so far; panics on any other call pattern.
    pub(crate) fn only_get(&self) -> String {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        assert_eq!(calls[0].0, HttpMethod::Get);
        calls[0].1.clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((method, path.to_string(), body.cloned()));
        Ok(self.response.clone())
    }
}

pub(crate) fn dummy_project(name: &str, id: u64) -> Value {
    json!({
        "announcement": "hello",
        "completed_on": 1399023029,
        "url": "fake_url",
        "is_completed": false,
        "show_announcement": true,
        "id": id,
        "name": name,
    })
}

pub(crate) fn dummy_suite(name: &str, id: u64) -> Value {
    json!({
        "url": "fake_url",
        "description": "Blah",
        "project_id": 123,
        "id": id,
        "name": name,
    })
}

pub(crate) fn dummy_case(id: u64) -> Value {
    json!({
        "custom_steps": null,
        "updated_by": 6,
        "type_id": 6,
        "estimate": null,
        "refs": null,
        "priority_id": 4,
        "section_id": 2,
        "created_by": 6,
        "custom_preconds": null,
        "created_on": 1399023029,
        "custom_expected": null,
        "suite_id": 3,
        "updated_on": 1399023029,
        "title": "Potmeter position input",
        "milestone_id": null,
        "id": id,
        "estimate_forecast": null,
    })
}

pub(crate) fn dummy_run(id: u64) -> Value {
    json!({
        "include_all": false,
        "is_completed": false,
        "created_on": 1399024614,
        "retest_count": 0,
        "id": id,
        "plan_id": null,
        "created_by": 6,
        "passed_count": 0,
        "project_id": 2,
        "config": null,
        "failed_count": 0,
        "description": null,
        "suite_id": 3,
        "milestone_id": null,
        "name": "Automated nightly run",
        "assignedto_id": null,
        "blocked_count": 0,
        "completed_on": null,
        "config_ids": [],
        "url": "fake_url",
        "untested_count": 1,
        "custom_status1_count": 0,
        "custom_status7_count": 0,
    })
}

pub(crate) fn dummy_test(id: u64) -> Value {
    json!({
        "assignedto_id": null,
        "status_id": 3,
        "priority_id": 4,
        "title": "Force A input",
        "refs": null,
        "run_id": 2,
        "custom_steps": null,
        "custom_preconds": null,
        "case_id": 3,
        "estimate_forecast": null,
        "type_id": 6,
        "estimate": null,
        "milestone_id": null,
        "id": id,
    })
}

pub(crate) fn dummy_status(id: u64) -> Value {
    json!({
        "color_bright": 12709313,
        "color_dark": 6667107,
        "color_medium": 9820525,
        "id": id,
        "is_final": true,
        "is_system": true,
        "is_untested": false,
        "label": "Passed",
        "name": "passed",
    })
}

/// Remove one key from a fixture to exercise required-field checks.
pub(crate) fn without(mut value: Value, key: &str) -> Value {
    if let Value::Object(map) = &mut value {
        map.remove(key);
    }
    value
}
