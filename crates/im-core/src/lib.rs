//! # im-core
//!
//! Core domain models and business logic for InvestMatch onboarding.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod auth;
pub mod config;
pub mod ports;
pub mod registration;
pub mod submission;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use auth::{AuthMode, HostEvent, LoginCredentials, OpenSurface};
pub use config::OnboardingConfig;
pub use registration::{DocumentSlot, RegistrationPayload, RegistrationSession, Role};
pub use submission::SubmissionState;
pub use validation::{validate, FieldErrors, FieldValues, StepSchema, StepSchemas, ValidationErrorKind};
pub use wizard::{RegistrationStateMachine, WizardAction, WizardError, WizardEvent, WizardStep};
