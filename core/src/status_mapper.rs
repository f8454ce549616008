//! Resolve numeric status ids to `Status` records.

use crate::error::ApiError;
use crate::records::{Status, Test};

/// Borrowed lookup over a previously fetched status list.
///
/// Lookup is a linear scan in list order, so the first status with a given id
/// wins.
#[derive(Debug, Clone, Copy)]
pub struct StatusMapper<'a> {
    statuses: &'a [Status],
}

impl<'a> StatusMapper<'a> {
    pub fn new(statuses: &'a [Status]) -> Self {
        Self { statuses }
    }

    pub fn lookup(&self, status_id: u64) -> Result<&'a Status, ApiError> {
        self.statuses
            .iter()
            .find(|s| s.id() == status_id)
            .ok_or(ApiError::UnmappedStatus(status_id))
    }

    /// The current status of `test`.
    pub fn status_of(&self, test: &Test) -> Result<&'a Status, ApiError> {
        self.lookup(test.status_id())
    }

    pub fn statuses(&self) -> &'a [Status] {
        self.statuses
    }
}
