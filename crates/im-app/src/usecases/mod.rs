//! Onboarding use cases
//!
//! [AuthHostController]
//!         ↓                       ↓
//! [WizardController]        login submission
//!         ↓                       ↓
//! RegistrationStateMachine  →  [SubmissionGuard]  →  IdentityServicePort

pub mod host;
pub mod submission;
pub mod wizard;

pub use host::{AuthHostController, HostDependencies, HostError, LoginOutcome, LoginSnapshot};
pub use submission::{SubmissionGuard, SubmissionGuardError, SubmissionOutcome};
pub use wizard::{WizardController, WizardControllerError, WizardSnapshot};
