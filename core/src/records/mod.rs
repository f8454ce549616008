//! Typed records for TestRail entities.
//!
//! # Design
//! Each record is built from one JSON object returned by the API and is
//! immutable afterwards: fields are private and exposed through accessors.
//! Relationships are foreign-key ids; following one is an explicit call
//! (`Project::get_suites`, `Test::get_case`, ...) that goes back through the
//! shared `Transport` handle the record was built with.

mod case;
mod project;
mod run;
mod status;
mod suite;

pub use case::Case;
pub use project::Project;
pub use run::Run;
pub use status::Status;
pub use suite::Suite;
pub use test::{NewResult, Test};
