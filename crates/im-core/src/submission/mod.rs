//! Submission domain model
//!
//! State of one single-flight submission (a login attempt or the final
//! registration submit).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// The operation is in flight.
    Pending,
    /// The operation succeeded; waiting for the caller to acknowledge.
    Succeeded,
    /// The operation failed; waiting for the caller to acknowledge.
    Failed { reason: String },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    /// Whether an outcome is waiting to be acknowledged.
    pub fn has_outcome(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded | SubmissionState::Failed { .. }
        )
    }
}
