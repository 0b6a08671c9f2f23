//! Registration state machine.
//!
//! Defines a pure state transition function for the registration wizard.
//!
//! 注册向导的纯状态迁移函数：不包含副作用。

use super::{WizardAction, WizardError, WizardEvent, WizardStep};
use crate::registration::{RegistrationSession, Role};
use crate::validation::{validate, FieldErrors, FieldValues, StepSchema, StepSchemas, ValidationErrorKind};

/// Next session and the side-effects the caller must execute.
pub type Transition = (RegistrationSession, Vec<WizardAction>);

/// Pure registration state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone)]
pub struct RegistrationStateMachine {
    schemas: StepSchemas,
}

impl RegistrationStateMachine {
    pub fn new(schemas: StepSchemas) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &StepSchemas {
        &self.schemas
    }

    /// Open a fresh session at role selection.
    pub fn start(&self) -> RegistrationSession {
        RegistrationSession::new(&self.schemas)
    }

    /// Apply `event` to `session`.
    ///
    /// The input session is never modified; on `Err` the caller keeps it as is.
    pub fn transition(
        &self,
        session: &RegistrationSession,
        event: WizardEvent,
    ) -> Result<Transition, WizardError> {
        let mut next = session.clone();
        let role = session.role;
        let mut actions = Vec::new();

        match (session.current_step, event) {
            // ===== Role =====
            (WizardStep::RoleSelect, WizardEvent::SelectRole { role }) => {
                next.role = role;
            }
            (WizardStep::RoleSelect, WizardEvent::Next) => {
                enter(&mut next, WizardStep::PersonalInfo);
            }

            // ===== Personal info =====
            (WizardStep::PersonalInfo, WizardEvent::EditField { field, value }) => {
                edit(
                    &mut next.personal_info,
                    &self.schemas.personal_info,
                    WizardStep::PersonalInfo,
                    field,
                    value,
                )?;
            }
            (WizardStep::PersonalInfo, WizardEvent::Next) => {
                let errors = validate(&self.schemas.personal_info, &next.personal_info);
                if errors.is_empty() {
                    let to = if role.has_business_step() {
                        WizardStep::BusinessInfo
                    } else {
                        WizardStep::DocumentUpload
                    };
                    enter(&mut next, to);
                } else {
                    next.field_errors = errors;
                }
            }
            (WizardStep::PersonalInfo, WizardEvent::Back) => {
                enter(&mut next, WizardStep::RoleSelect);
            }

            // ===== Business info =====
            (WizardStep::BusinessInfo, WizardEvent::EditField { field, value }) => {
                edit(
                    &mut next.business_info,
                    &self.schemas.business_info,
                    WizardStep::BusinessInfo,
                    field,
                    value,
                )?;
            }
            (WizardStep::BusinessInfo, WizardEvent::Next) => {
                let errors = validate(&self.schemas.business_info, &next.business_info);
                if errors.is_empty() {
                    enter(&mut next, WizardStep::DocumentUpload);
                } else {
                    next.field_errors = errors;
                }
            }
            (WizardStep::BusinessInfo, WizardEvent::Back) => {
                enter(&mut next, WizardStep::PersonalInfo);
            }

            // ===== Documents =====
            (WizardStep::DocumentUpload, WizardEvent::SetDocument { slot, filled }) => {
                if !slot.applies_to(role) {
                    return Err(WizardError::SlotNotApplicable { slot, role });
                }
                next.documents.set(slot, filled);
            }
            (WizardStep::DocumentUpload, WizardEvent::Back) => {
                enter(&mut next, step_before_documents(role));
            }
            (WizardStep::DocumentUpload, WizardEvent::Submit) => {
                next.last_failure = None;
                let missing = next.documents.missing_required(role);
                if missing.is_empty() {
                    next.field_errors.clear();
                    actions.push(WizardAction::SubmitRegistration {
                        payload: next.payload(),
                    });
                } else {
                    next.field_errors = missing
                        .into_iter()
                        .map(|slot| (slot.field_name().to_string(), ValidationErrorKind::Required))
                        .collect();
                }
            }

            // ===== Results =====
            (WizardStep::DocumentUpload, WizardEvent::SubmissionSucceeded) => {
                enter(&mut next, WizardStep::Complete);
            }
            (WizardStep::DocumentUpload, WizardEvent::SubmissionFailed { reason }) => {
                next.last_failure = Some(reason);
            }

            (step, event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?step, event = event.name(), "wizard transition rejected");
                return Err(WizardError::IllegalTransition {
                    step,
                    event: event.name(),
                });
            }
        }

        Ok((next, actions))
    }
}

/// Step the back button leads to from document upload; mirrors the forward skip.
fn step_before_documents(role: Role) -> WizardStep {
    if role.has_business_step() {
        WizardStep::BusinessInfo
    } else {
        WizardStep::PersonalInfo
    }
}

fn enter(session: &mut RegistrationSession, step: WizardStep) {
    session.current_step = step;
    session.field_errors = FieldErrors::new();
    session.last_failure = None;
}

fn edit(
    bucket: &mut FieldValues,
    schema: &StepSchema,
    step: WizardStep,
    field: String,
    value: String,
) -> Result<(), WizardError> {
    if !schema.contains(&field) {
        return Err(WizardError::UnknownField { step, field });
    }
    bucket.insert(field, value);
    Ok(())
}
