use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use im_core::{
    ports::IdentityServicePort, validate, FieldErrors, LoginCredentials, StepSchema,
};

use crate::usecases::submission::{SubmissionGuard, SubmissionGuardError, SubmissionOutcome};

/// Result of a login submit-intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Credentials accepted; the surface has been closed.
    SignedIn,
    /// The form did not validate; the identity service was not called.
    Rejected { field_errors: FieldErrors },
    /// The identity service refused or failed.
    Failed { reason: String },
}

/// What the shell renders for the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSnapshot {
    pub field_errors: FieldErrors,
    pub last_failure: Option<String>,
    pub pending: bool,
}

#[derive(Debug, Default)]
struct LoginForm {
    field_errors: FieldErrors,
    last_failure: Option<String>,
}

/// Transient state of the login mode.
#[derive(Debug)]
pub(crate) struct LoginFlow {
    guard: SubmissionGuard,
    form: Mutex<LoginForm>,
}

impl LoginFlow {
    pub(crate) fn new(timeout: Option<Duration>) -> Self {
        Self {
            guard: SubmissionGuard::with_timeout(timeout),
            form: Mutex::new(LoginForm::default()),
        }
    }

    pub(crate) fn snapshot(&self) -> LoginSnapshot {
        let form = self.form();
        LoginSnapshot {
            field_errors: form.field_errors.clone(),
            last_failure: form.last_failure.clone(),
            pending: self.guard.is_pending(),
        }
    }

    /// Validate `credentials` and authenticate them through the guard.
    pub(crate) async fn submit(
        &self,
        schema: &StepSchema,
        identity: &dyn IdentityServicePort,
        credentials: LoginCredentials,
    ) -> Result<LoginOutcome, SubmissionGuardError> {
        if self.guard.is_pending() {
            return Err(SubmissionGuardError::Busy);
        }

        let field_errors = validate(schema, &credentials.form_values());
        if !field_errors.is_empty() {
            debug!(errors = ?field_errors, "login form rejected");
            let mut form = self.form();
            form.field_errors = field_errors.clone();
            form.last_failure = None;
            return Ok(LoginOutcome::Rejected { field_errors });
        }

        info!(identifier = %credentials.identifier, remember_me = credentials.remember_me, "login submitted");
        let outcome = self
            .guard
            .submit(credentials, |credentials| identity.authenticate(credentials))
            .await?;

        let result = {
            let mut form = self.form();
            form.field_errors.clear();
            match outcome {
                SubmissionOutcome::Succeeded(()) => {
                    form.last_failure = None;
                    LoginOutcome::SignedIn
                }
                SubmissionOutcome::Failed { reason } => {
                    form.last_failure = Some(reason.clone());
                    LoginOutcome::Failed { reason }
                }
            }
        };
        self.guard.acknowledge()?;
        Ok(result)
    }

    fn form(&self) -> MutexGuard<'_, LoginForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
