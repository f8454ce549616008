//! Synchronous client binding for the TestRail API v2.
//!
//! # Overview
//! `Client` lists projects and statuses; the returned records navigate to
//! their related entities (project → suites → cases, project → runs → tests,
//! test → case) through the transport they were built with. `StatusMapper`
//! resolves a test's `status_id` to its `Status`.
//!
//! # Design
//! - `Transport` is the single seam to the network. `HttpTransport` is the
//!   blocking ureq implementation; unit tests substitute a recording fake.
//! - Records are immutable and built field by field from JSON objects; the
//!   first missing key aborts construction with `ApiError::MissingField`.
//! - Credentials live in `ClientConfig` and can be swapped later with
//!   `Client::set_credentials`.
//!
//! ```no_run
//! use testrail_core::{Client, ClientConfig, StatusMapper};
//!
//! # fn main() -> Result<(), testrail_core::ApiError> {
//! let config = ClientConfig::new("http://myserver/testrail/").with_credentials("chuck", "norris");
//! let client = Client::new(&config);
//! let statuses = client.get_statuses()?;
//! let mapper = StatusMapper::new(&statuses);
//! for project in client.get_projects()? {
//!     for run in project.get_runs()? {
//!         for test in run.get_tests()? {
//!             println!("{} -> {}", test.title(), mapper.status_of(&test)?.name());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod records;
pub mod status_mapper;
pub mod transport;

mod record;
#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::{ClientConfig, Credentials};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use records::{Case, NewResult, Project, Run, Status, Suite, Test};
pub use status_mapper::StatusMapper;
pub use transport::{HttpTransport, Transport};
