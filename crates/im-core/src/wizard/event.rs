use serde::{Deserialize, Serialize};

use crate::registration::{DocumentSlot, Role};

/// Events that drive the registration wizard.
///
/// 驱动注册向导的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    // Role selection
    SelectRole { role: Role },

    // Data entry
    EditField { field: String, value: String },
    SetDocument { slot: DocumentSlot, filled: bool },

    // Navigation
    Next,
    Back,
    Submit,

    // Results (from controller)
    SubmissionSucceeded,
    SubmissionFailed { reason: String },
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SelectRole { .. } => "SelectRole",
            WizardEvent::EditField { .. } => "EditField",
            WizardEvent::SetDocument { .. } => "SetDocument",
            WizardEvent::Next => "Next",
            WizardEvent::Back => "Back",
            WizardEvent::Submit => "Submit",
            WizardEvent::SubmissionSucceeded => "SubmissionSucceeded",
            WizardEvent::SubmissionFailed { .. } => "SubmissionFailed",
        }
    }
}
