//! Error type for the TestRail client.
//!
//! # Design
//! Every failure the binding can produce is an `ApiError`. HTTP failures keep
//! the numeric status next to the server-provided text so callers can branch
//! on either. Record parsing reports the first key that failed, never an
//! aggregate, and no partially built record escapes.

use thiserror::Error;

/// Errors returned by the transport, the record constructors, and the status
/// mapper.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the quoted
    /// `error` field of the response body when one was present.
    #[error("TestRail API returned HTTP {status} ({message})")]
    Http { status: u16, message: String },

    /// A required key was absent from a record payload.
    #[error("Failed to parse {entity} data (missing key '{key}')")]
    MissingField { entity: &'static str, key: String },

    /// A required key was present but held a value of the wrong shape.
    #[error("Failed to parse {entity} data (key '{key}': {reason})")]
    InvalidField {
        entity: &'static str,
        key: String,
        reason: String,
    },

    /// `get_case` for a test did not resolve to exactly one case.
    #[error("Invalid test case (test id {test_id}, case id {case_id})")]
    InvalidTestCase { test_id: u64, case_id: u64 },

    #[error("Failed to map status ID {0}")]
    UnmappedStatus(u64),

    /// The response body could not be decoded into the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced an HTTP response (DNS, connect, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_mentions_status_and_message() {
        let err = ApiError::Http {
            status: 400,
            message: "\"bad\"".to_string(),
        };
        assert_eq!(err.to_string(), "TestRail API returned HTTP 400 (\"bad\")");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn missing_field_names_entity_and_key() {
        let err = ApiError::MissingField {
            entity: "project",
            key: "name".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse project data (missing key 'name')");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn invalid_test_case_names_both_ids() {
        let err = ApiError::InvalidTestCase {
            test_id: 5,
            case_id: 3,
        };
        assert_eq!(err.to_string(), "Invalid test case (test id 5, case id 3)");
    }
}
