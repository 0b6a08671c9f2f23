use std::fmt;

use serde::{Deserialize, Serialize};

use super::Role;

/// Document slots of the document upload step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    /// Government-issued ID. Mandatory for every role.
    Identity,
    /// Business registration certificate. Mandatory for businesses only.
    BusinessRegistration,
    /// Supporting documents. Always optional.
    Additional,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 3] = [
        DocumentSlot::Identity,
        DocumentSlot::BusinessRegistration,
        DocumentSlot::Additional,
    ];

    /// Key used when reporting a slot in field errors.
    pub fn field_name(self) -> &'static str {
        match self {
            DocumentSlot::Identity => "identityDocument",
            DocumentSlot::BusinessRegistration => "businessRegistrationDocument",
            DocumentSlot::Additional => "additionalDocuments",
        }
    }

    pub fn applies_to(self, role: Role) -> bool {
        match self {
            DocumentSlot::BusinessRegistration => role.has_business_step(),
            DocumentSlot::Identity | DocumentSlot::Additional => true,
        }
    }

    pub fn is_required_for(self, role: Role) -> bool {
        match self {
            DocumentSlot::Identity => true,
            DocumentSlot::BusinessRegistration => role.has_business_step(),
            DocumentSlot::Additional => false,
        }
    }
}

/// Which document slots have been filled.
///
/// Only the fact that a slot is filled is tracked here; the file itself lives
/// in document storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    pub identity: bool,
    pub business_registration: bool,
    pub additional: bool,
}

impl DocumentState {
    pub fn is_filled(&self, slot: DocumentSlot) -> bool {
        match slot {
            DocumentSlot::Identity => self.identity,
            DocumentSlot::BusinessRegistration => self.business_registration,
            DocumentSlot::Additional => self.additional,
        }
    }

    pub fn set(&mut self, slot: DocumentSlot, filled: bool) {
        match slot {
            DocumentSlot::Identity => self.identity = filled,
            DocumentSlot::BusinessRegistration => self.business_registration = filled,
            DocumentSlot::Additional => self.additional = filled,
        }
    }

    /// Mandatory slots for `role` that are still empty.
    pub fn missing_required(&self, role: Role) -> Vec<DocumentSlot> {
        DocumentSlot::ALL
            .into_iter()
            .filter(|slot| slot.is_required_for(role) && !self.is_filled(*slot))
            .collect()
    }
}

/// A file handed over by the shell for one document slot.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_depends_on_role() {
        let empty = DocumentState::default();
        assert_eq!(empty.missing_required(Role::Investor), vec![DocumentSlot::Identity]);
        assert_eq!(
            empty.missing_required(Role::Business),
            vec![DocumentSlot::Identity, DocumentSlot::BusinessRegistration]
        );

        let mut state = DocumentState::default();
        state.set(DocumentSlot::Identity, true);
        assert!(state.missing_required(Role::Investor).is_empty());
        assert_eq!(
            state.missing_required(Role::Business),
            vec![DocumentSlot::BusinessRegistration]
        );
    }

    #[test]
    fn additional_slot_is_never_required() {
        assert!(!DocumentSlot::Additional.is_required_for(Role::Investor));
        assert!(!DocumentSlot::Additional.is_required_for(Role::Business));
        assert!(!DocumentSlot::BusinessRegistration.applies_to(Role::Investor));
    }

    #[test]
    fn upload_debug_omits_bytes() {
        let upload = DocumentUpload {
            file_name: "passport.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        };
        let rendered = format!("{upload:?}");
        assert!(rendered.contains("len: 3"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }
}
