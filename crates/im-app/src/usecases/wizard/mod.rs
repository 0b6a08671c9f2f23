//! Registration wizard use case.

mod controller;

use serde::Serialize;

use im_core::RegistrationSession;

pub use controller::{WizardController, WizardControllerError};

/// What the shell renders for the registration wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub session: RegistrationSession,
    /// True while the final submission is in flight.
    pub pending: bool,
}
