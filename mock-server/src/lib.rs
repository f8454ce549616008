//! In-memory stand-in for a TestRail server.
//!
//! Serves `GET/POST /index.php?/api/v2/{method}[/{id}][&key=value...]` from a
//! fixed fixture, enforces Basic authentication, and answers failures the way
//! TestRail does: a 4xx status with `{"error": "..."}`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DEFAULT_USER: &str = "user";
pub const DEFAULT_PASSWORD: &str = "password";

const API_PREFIX: &str = "/api/v2/";
const AUTH_FAILED: &str =
    "Authentication failed: invalid or missing user/password or session cookie.";

/// The account the server accepts.
#[derive(Clone, Debug)]
pub struct Account {
    pub user: String,
    pub password: String,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Entity tables, each a list of API-shaped JSON objects.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub projects: Vec<Value>,
    pub suites: Vec<Value>,
    pub cases: Vec<Value>,
    pub runs: Vec<Value>,
    pub tests: Vec<Value>,
    pub statuses: Vec<Value>,
    pub results: Vec<Value>,
}

pub struct AppState {
    account: Account,
    data: RwLock<Fixture>,
}

pub type Db = Arc<AppState>;

/// Router with the default account and fixture.
pub fn app() -> Router {
    app_with(Account::default(), Fixture::default())
}

pub fn app_with(account: Account, fixture: Fixture) -> Router {
    let state: Db = Arc::new(AppState {
        account,
        data: RwLock::new(fixture),
    });
    Router::new()
        .route("/index.php", get(handle_get).post(handle_post))
        .with_state(state)
}

pub async fn run_with(
    listener: TcpListener,
    account: Account,
    fixture: Fixture,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(account, fixture)).await
}

/// A TestRail-style failure: status code plus the `error` text.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// `get_cases/1&suite_id=3` split into method, path argument and parameters.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiCall<'a> {
    pub method: &'a str,
    pub arg: Option<&'a str>,
    pub params: Vec<(&'a str, &'a str)>,
}

impl<'a> ApiCall<'a> {
    pub fn parse(query: &'a str) -> Result<Self, ApiFailure> {
        let call = query
            .strip_prefix(API_PREFIX)
            .ok_or_else(|| ApiFailure::bad_request("Invalid API URI; expected /api/v2/<method>"))?;
        let mut parts = call.split('&');
        let head = parts.next().unwrap_or_default();
        let (method, arg) = match head.split_once('/') {
            Some((method, arg)) => (method, Some(arg)),
            None => (head, None),
        };
        let params = parts
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect();
        Ok(Self { method, arg, params })
    }

    fn id(&self, field: &str) -> Result<u64, ApiFailure> {
        self.arg
            .and_then(|a| a.parse().ok())
            .ok_or_else(|| ApiFailure::bad_request(format!("Field :{field} is not a valid ID.")))
    }

    fn param(&self, name: &str) -> Option<&'a str> {
        self.params.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

fn authorize(account: &Account, headers: &HeaderMap) -> Result<(), ApiFailure> {
    let expected = STANDARD.encode(format!("{}:{}", account.user, account.password));
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "));
    if supplied == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(ApiFailure {
            status: StatusCode::UNAUTHORIZED,
            message: AUTH_FAILED.to_string(),
        })
    }
}

fn id_of(value: &Value) -> Option<u64> {
    value["id"].as_u64()
}

fn find<'v>(table: &'v [Value], id: u64) -> Option<&'v Value> {
    table.iter().find(|v| id_of(v) == Some(id))
}

fn where_eq(table: &[Value], key: &str, id: u64) -> Vec<Value> {
    table.iter().filter(|v| v[key].as_u64() == Some(id)).cloned().collect()
}

async fn handle_get(
    State(db): State<Db>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiFailure> {
    authorize(&db.account, &headers)?;
    let query = query.unwrap_or_default();
    let call = ApiCall::parse(&query)?;
    debug!(method = call.method, arg = ?call.arg, "GET");

    let data = db.data.read().await;
    let value = match call.method {
        "get_projects" => Value::from(data.projects.clone()),
        "get_statuses" => Value::from(data.statuses.clone()),
        "get_suites" => {
            let project_id = existing_project(&data, &call)?;
            Value::from(where_eq(&data.suites, "project_id", project_id))
        }
        "get_runs" => {
            let project_id = existing_project(&data, &call)?;
            Value::from(where_eq(&data.runs, "project_id", project_id))
        }
        "get_cases" => {
            let project_id = existing_project(&data, &call)?;
            let suite_id = call
                .param("suite_id")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|id| {
                    find(&data.suites, *id).is_some_and(|s| s["project_id"].as_u64() == Some(project_id))
                })
                .ok_or_else(|| {
                    ApiFailure::bad_request("Field :suite_id is not a valid test suite.")
                })?;
            Value::from(where_eq(&data.cases, "suite_id", suite_id))
        }
        "get_tests" => {
            let run_id = call.id("run_id")?;
            find(&data.runs, run_id).ok_or_else(|| {
                ApiFailure::bad_request("Field :run_id is not a valid test run.")
            })?;
            Value::from(where_eq(&data.tests, "run_id", run_id))
        }
        "get_case" => {
            let case_id = call.id("case_id")?;
            find(&data.cases, case_id)
                .cloned()
                .ok_or_else(|| ApiFailure::bad_request("Field :case_id is not a valid test case."))?
        }
        other => return Err(ApiFailure::bad_request(format!("Unknown method '{other}'"))),
    };
    Ok(Json(value))
}

fn existing_project(data: &Fixture, call: &ApiCall<'_>) -> Result<u64, ApiFailure> {
    let project_id = call.id("project_id")?;
    find(&data.projects, project_id)
        .map(|_| project_id)
        .ok_or_else(|| ApiFailure::bad_request("Field :project_id is not a valid or accessible project."))
}

#[derive(Deserialize)]
struct AddResult {
    status_id: Option<u64>,
    comment: Option<String>,
    version: Option<String>,
    elapsed: Option<String>,
    defects: Option<String>,
    assignedto_id: Option<u64>,
}

async fn handle_post(
    State(db): State<Db>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Json<Value>, ApiFailure> {
    authorize(&db.account, &headers)?;
    let query = query.unwrap_or_default();
    let call = ApiCall::parse(&query)?;
    debug!(method = call.method, arg = ?call.arg, bytes = body.len(), "POST");

    match call.method {
        "add_result" => {
            let test_id = call.id("test_id")?;
            let input: AddResult = serde_json::from_slice(&body)
                .map_err(|e| ApiFailure::bad_request(format!("Invalid JSON body: {e}")))?;
            let status_id = input
                .status_id
                .ok_or_else(|| ApiFailure::bad_request("Field :status_id is a required field."))?;

            let mut data = db.data.write().await;
            if find(&data.statuses, status_id).is_none() {
                return Err(ApiFailure::bad_request("Field :status_id is not a valid status."));
            }
            let test = data
                .tests
                .iter_mut()
                .find(|t| id_of(t) == Some(test_id))
                .ok_or_else(|| ApiFailure::bad_request("Field :test_id is not a valid test."))?;
            test["status_id"] = json!(status_id);

            let result = json!({
                "id": data.results.len() as u64 + 1,
                "test_id": test_id,
                "status_id": status_id,
                "comment": input.comment,
                "version": input.version,
                "elapsed": input.elapsed,
                "defects": input.defects,
                "assignedto_id": input.assignedto_id,
                "created_by": 1,
                "created_on": 1399030000,
            });
            data.results.push(result.clone());
            info!(test_id, status_id, "result added");
            Ok(Json(result))
        }
        other => Err(ApiFailure::bad_request(format!("Unknown method '{other}'"))),
    }
}

impl Default for Fixture {
    /// Two projects; the first has one suite with two cases and one run whose
    /// two tests are passed and untested. Statuses are TestRail's defaults.
    fn default() -> Self {
        Self {
            projects: vec![
                project(1, "Datahub", false, None),
                project(2, "Legacy importer", true, Some(1398000000)),
            ],
            suites: vec![json!({
                "id": 1,
                "name": "Baseline",
                "description": "Core regression suite",
                "project_id": 1,
                "url": "http://testrail.local/index.php?/suites/view/1",
            })],
            cases: vec![
                case(1, 1, "Potmeter position input"),
                case(2, 1, "Force A input"),
            ],
            runs: vec![json!({
                "id": 1,
                "name": "Automated nightly run",
                "description": null,
                "suite_id": 1,
                "project_id": 1,
                "plan_id": null,
                "milestone_id": null,
                "assignedto_id": null,
                "include_all": true,
                "is_completed": false,
                "completed_on": null,
                "config": null,
                "config_ids": [],
                "passed_count": 1,
                "blocked_count": 0,
                "untested_count": 1,
                "retest_count": 0,
                "failed_count": 0,
                "custom_status1_count": 0,
                "created_on": 1399024614,
                "created_by": 1,
                "url": "http://testrail.local/index.php?/runs/view/1",
            })],
            tests: vec![
                test(1, 1, "Potmeter position input", 1),
                test(2, 2, "Force A input", 3),
            ],
            statuses: vec![
                status(1, "passed", "Passed", true, false),
                status(2, "blocked", "Blocked", true, false),
                status(3, "untested", "Untested", false, true),
                status(4, "retest", "Retest", false, false),
                status(5, "failed", "Failed", true, false),
            ],
            results: Vec::new(),
        }
    }
}

fn project(id: u64, name: &str, is_completed: bool, completed_on: Option<i64>) -> Value {
    json!({
        "id": id,
        "name": name,
        "announcement": "Welcome to the project",
        "show_announcement": false,
        "is_completed": is_completed,
        "completed_on": completed_on,
        "url": format!("http://testrail.local/index.php?/projects/overview/{id}"),
    })
}

fn case(id: u64, suite_id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "section_id": 1,
        "suite_id": suite_id,
        "type_id": 6,
        "priority_id": 4,
        "milestone_id": null,
        "refs": null,
        "created_by": 1,
        "created_on": 1399023029,
        "updated_by": 1,
        "updated_on": 1399023029,
        "estimate": null,
        "estimate_forecast": null,
        "custom_steps": null,
        "custom_preconds": null,
        "custom_expected": null,
    })
}

fn test(id: u64, case_id: u64, title: &str, status_id: u64) -> Value {
    json!({
        "id": id,
        "case_id": case_id,
        "run_id": 1,
        "status_id": status_id,
        "title": title,
        "assignedto_id": null,
        "priority_id": 4,
        "type_id": 6,
        "milestone_id": null,
        "refs": null,
        "estimate": null,
        "estimate_forecast": null,
        "custom_steps": null,
        "custom_preconds": null,
    })
}

fn status(id: u64, name: &str, label: &str, is_final: bool, is_untested: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "label": label,
        "color_bright": 12709313,
        "color_medium": 9820525,
        "color_dark": 6667107,
        "is_final": is_final,
        "is_system": true,
        "is_untested": is_untested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_method() {
        let call = ApiCall::parse("/api/v2/get_projects").unwrap();
        assert_eq!(call.method, "get_projects");
        assert_eq!(call.arg, None);
        assert!(call.params.is_empty());
    }

    #[test]
    fn parses_method_with_id() {
        let call = ApiCall::parse("/api/v2/get_suites/3").unwrap();
        assert_eq!(call.method, "get_suites");
        assert_eq!(call.id("project_id").unwrap(), 3);
    }

    #[test]
    fn parses_ampersand_parameters() {
        let call = ApiCall::parse("/api/v2/get_cases/1&suite_id=3").unwrap();
        assert_eq!(call.method, "get_cases");
        assert_eq!(call.arg, Some("1"));
        assert_eq!(call.param("suite_id"), Some("3"));
    }

    #[test]
    fn rejects_foreign_prefix() {
        assert!(ApiCall::parse("/api/v1/get_projects").is_err());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let call = ApiCall::parse("/api/v2/get_case/abc").unwrap();
        let err = call.id("case_id").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Field :case_id is not a valid ID.");
    }

    #[test]
    fn authorize_accepts_matching_basic_header() {
        let account = Account::default();
        let mut headers = HeaderMap::new();
        let token = STANDARD.encode("user:password");
        headers.insert(header::AUTHORIZATION, format!("Basic {token}").parse().unwrap());
        assert!(authorize(&account, &headers).is_ok());
    }

    #[test]
    fn authorize_rejects_missing_header() {
        let err = authorize(&Account::default(), &HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn default_fixture_is_consistent() {
        let fixture = Fixture::default();
        for test in &fixture.tests {
            let case_id = test["case_id"].as_u64().unwrap();
            assert!(find(&fixture.cases, case_id).is_some());
            let status_id = test["status_id"].as_u64().unwrap();
            assert!(find(&fixture.statuses, status_id).is_some());
        }
    }
}
