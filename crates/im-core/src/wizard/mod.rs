//! Registration wizard domain module.
//!
//! This module defines the registration wizard state machine types.

mod action;
mod error;
mod event;
mod state;
pub mod state_machine;

pub use action::WizardAction;
pub use error::WizardError;
pub use event::WizardEvent;
pub use state::WizardStep;
pub use state_machine::{RegistrationStateMachine, Transition};
