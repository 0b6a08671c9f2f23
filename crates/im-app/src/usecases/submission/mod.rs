//! Submission use cases.
//!
//! This module exposes the single-flight submission guard.

mod guard;

pub use guard::{SubmissionGuard, SubmissionGuardError, SubmissionOutcome};
