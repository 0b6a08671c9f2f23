use crate::registration::{DocumentSlot, Role};

use super::WizardStep;

/// Errors produced by the registration state machine.
///
/// Validation failures are not errors: they keep the wizard on its step and
/// populate the session's field errors instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("{event} is not permitted at step {step:?}")]
    IllegalTransition {
        step: WizardStep,
        event: &'static str,
    },
    #[error("field `{field}` does not belong to step {step:?}")]
    UnknownField { step: WizardStep, field: String },
    #[error("document slot {slot:?} does not apply to role {role:?}")]
    SlotNotApplicable { slot: DocumentSlot, role: Role },
}
