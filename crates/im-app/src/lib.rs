//! InvestMatch onboarding orchestration layer
//!
//! This crate contains the controllers that drive the core state machines and
//! call out to the identity and document collaborators.

pub mod usecases;

pub use usecases::{
    AuthHostController, HostDependencies, HostError, LoginOutcome, SubmissionGuard,
    WizardController, WizardSnapshot,
};
