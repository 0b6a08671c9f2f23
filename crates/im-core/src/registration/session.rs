use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    fields, BusinessInfo, DocumentSlot, DocumentState, DocumentStatePayload, PersonalInfo,
    RegistrationPayload, Role,
};
use crate::validation::{FieldErrors, FieldValues, StepSchemas};
use crate::wizard::WizardStep;

/// State of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSession {
    pub id: Uuid,
    pub role: Role,
    pub personal_info: FieldValues,
    pub business_info: FieldValues,
    pub documents: DocumentState,
    pub current_step: WizardStep,
    pub field_errors: FieldErrors,
    /// Reason reported by the last failed submission, if any.
    pub last_failure: Option<String>,
}

impl RegistrationSession {
    /// Start a session at role selection.
    ///
    /// Every field of the personal and business schemas gets an empty entry so
    /// the buckets always cover what their step validates.
    pub fn new(schemas: &StepSchemas) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::default(),
            personal_info: empty_bucket(schemas.personal_info.field_names()),
            business_info: empty_bucket(schemas.business_info.field_names()),
            documents: DocumentState::default(),
            current_step: WizardStep::RoleSelect,
            field_errors: FieldErrors::new(),
            last_failure: None,
        }
    }

    /// Assemble the payload for the identity service.
    ///
    /// Business info and the business registration slot are only included
    /// for business registrations, whatever the buckets still hold.
    pub fn payload(&self) -> RegistrationPayload {
        let is_business = self.role.has_business_step();
        RegistrationPayload {
            role: self.role,
            personal_info: PersonalInfo {
                first_name: value(&self.personal_info, fields::FIRST_NAME),
                last_name: value(&self.personal_info, fields::LAST_NAME),
                email: value(&self.personal_info, fields::EMAIL),
                phone: value(&self.personal_info, fields::PHONE),
                country: value(&self.personal_info, fields::COUNTRY),
            },
            business_info: is_business.then(|| BusinessInfo {
                business_name: value(&self.business_info, fields::BUSINESS_NAME),
                business_type: value(&self.business_info, fields::BUSINESS_TYPE),
                registration_number: value(&self.business_info, fields::REGISTRATION_NUMBER),
                founded_year: value(&self.business_info, fields::FOUNDED_YEAR),
                website: Some(value(&self.business_info, fields::WEBSITE))
                    .filter(|website| !website.is_empty()),
            }),
            document_state: DocumentStatePayload {
                identity_provided: self.documents.is_filled(DocumentSlot::Identity),
                business_registration_provided: is_business
                    .then(|| self.documents.is_filled(DocumentSlot::BusinessRegistration)),
                additional_provided: self.documents.is_filled(DocumentSlot::Additional),
            },
        }
    }
}

fn empty_bucket<'a>(names: impl Iterator<Item = &'a str>) -> FieldValues {
    names.map(|name| (name.to_string(), String::new())).collect()
}

fn value(bucket: &FieldValues, name: &str) -> String {
    bucket
        .get(name)
        .map(|raw| raw.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;

    fn session() -> RegistrationSession {
        RegistrationSession::new(&StepSchemas::with_latest_year(
            &ValidationConfig::default(),
            2024,
        ))
    }

    #[test]
    fn new_session_prefills_every_schema_field() {
        let session = session();
        assert_eq!(session.current_step, WizardStep::RoleSelect);
        assert_eq!(session.role, Role::Investor);
        assert_eq!(session.personal_info.len(), 5);
        assert_eq!(session.business_info.len(), 5);
        assert!(session.personal_info.values().all(String::is_empty));
    }

    #[test]
    fn payload_omits_business_data_for_investor() {
        let mut session = session();
        session
            .business_info
            .insert(fields::BUSINESS_NAME.into(), "Stale Co".into());
        session.documents.set(DocumentSlot::BusinessRegistration, true);

        let payload = session.payload();
        assert_eq!(payload.role, Role::Investor);
        assert!(payload.business_info.is_none());
        assert_eq!(payload.document_state.business_registration_provided, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("businessInfo").is_none());
        assert!(json["documentState"].get("businessRegistrationProvided").is_none());
    }

    #[test]
    fn payload_trims_values_and_drops_empty_website() {
        let mut session = session();
        session.role = Role::Business;
        session
            .personal_info
            .insert(fields::FIRST_NAME.into(), "  Alice ".into());
        session
            .business_info
            .insert(fields::FOUNDED_YEAR.into(), " 2020".into());

        let payload = session.payload();
        assert_eq!(payload.personal_info.first_name, "Alice");
        let business = payload.business_info.unwrap();
        assert_eq!(business.founded_year, "2020");
        assert_eq!(business.website, None);
        assert_eq!(payload.document_state.business_registration_provided, Some(false));
    }
}
