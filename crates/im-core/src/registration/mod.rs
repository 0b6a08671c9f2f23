//! Registration domain models
//!
//! A [`RegistrationSession`] is the aggregate of one registration attempt: the
//! selected role, the per-step data buckets, the document slots and the step
//! the wizard is currently on.

mod document;
pub mod fields;
mod payload;
mod session;

use serde::{Deserialize, Serialize};

pub use document::{DocumentSlot, DocumentState, DocumentUpload};
pub use payload::{BusinessInfo, DocumentStatePayload, PersonalInfo, RegistrationPayload};
pub use session::RegistrationSession;

/// Role a new account registers with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Investor,
    Business,
}

impl Role {
    /// Whether the business info step is part of this role's flow.
    pub fn has_business_step(self) -> bool {
        matches!(self, Role::Business)
    }
}
