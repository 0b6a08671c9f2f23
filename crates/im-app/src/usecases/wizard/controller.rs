//! Registration wizard controller.
//!
//! This module coordinates the registration state machine and side effects.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use im_core::{
    ports::{DocumentStorageError, DocumentStoragePort, IdentityServicePort},
    registration::{DocumentSlot, DocumentUpload, RegistrationSession, Role},
    wizard::{RegistrationStateMachine, WizardAction, WizardError, WizardEvent},
};

use crate::usecases::submission::{SubmissionGuard, SubmissionOutcome};

use super::WizardSnapshot;

/// Errors produced by the wizard controller.
#[derive(Debug, thiserror::Error)]
pub enum WizardControllerError {
    #[error(transparent)]
    Transition(#[from] WizardError),
    #[error("registration submission is already in flight")]
    SubmissionBusy,
    #[error("document storage failed: {0}")]
    Storage(#[from] DocumentStorageError),
}

/// Controller that owns one registration session.
///
/// While the final submission is pending every other operation is refused
/// with [`WizardControllerError::SubmissionBusy`].
pub struct WizardController {
    machine: RegistrationStateMachine,
    session: Mutex<RegistrationSession>,
    guard: SubmissionGuard,
    identity: Arc<dyn IdentityServicePort>,
    documents: Arc<dyn DocumentStoragePort>,
}

impl WizardController {
    pub fn new(
        machine: RegistrationStateMachine,
        identity: Arc<dyn IdentityServicePort>,
        documents: Arc<dyn DocumentStoragePort>,
        submission_timeout: Option<Duration>,
    ) -> Self {
        let session = machine.start();
        info!(session_id = %session.id, "registration session opened");
        Self {
            machine,
            session: Mutex::new(session),
            guard: SubmissionGuard::with_timeout(submission_timeout),
            identity,
            documents,
        }
    }

    pub async fn session_id(&self) -> Uuid {
        self.session.lock().await.id
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            session: self.session.lock().await.clone(),
            pending: self.guard.is_pending(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.guard.is_pending()
    }

    pub async fn select_role(&self, role: Role) -> Result<WizardSnapshot, WizardControllerError> {
        self.dispatch(WizardEvent::SelectRole { role }).await
    }

    pub async fn edit_field(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<WizardSnapshot, WizardControllerError> {
        self.dispatch(WizardEvent::EditField {
            field: field.into(),
            value: value.into(),
        })
        .await
    }

    pub async fn next(&self) -> Result<WizardSnapshot, WizardControllerError> {
        self.dispatch(WizardEvent::Next).await
    }

    pub async fn back(&self) -> Result<WizardSnapshot, WizardControllerError> {
        self.dispatch(WizardEvent::Back).await
    }

    /// Submit the registration from the document upload step.
    ///
    /// Resolves once the identity service has answered. On success the
    /// snapshot is at `Complete`; on failure it stays at `DocumentUpload` with
    /// `last_failure` set.
    pub async fn submit(&self) -> Result<WizardSnapshot, WizardControllerError> {
        self.dispatch(WizardEvent::Submit).await
    }

    /// Store `upload` and mark `slot` as filled once storage accepted it.
    pub async fn attach_document(
        &self,
        slot: DocumentSlot,
        upload: DocumentUpload,
    ) -> Result<WizardSnapshot, WizardControllerError> {
        self.ensure_idle()?;
        let event = WizardEvent::SetDocument { slot, filled: true };
        let session_id = self.check(&event).await?;

        let receipt = self
            .documents
            .store(session_id, slot, upload)
            .await
            .map_err(|err| {
                error!(error = %err, ?slot, %session_id, "failed to store document");
                err
            })?;
        debug!(?slot, digest = %receipt.digest, bytes = receipt.byte_len, "document stored");

        match self.run(event).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(error = %err, ?slot, "slot no longer accepts the document; discarding it");
                if let Err(discard_err) = self.documents.discard(session_id, slot).await {
                    error!(error = %discard_err, ?slot, %session_id, "failed to discard document");
                }
                Err(err)
            }
        }
    }

    /// Discard the document stored for `slot` and mark the slot empty.
    pub async fn clear_document(
        &self,
        slot: DocumentSlot,
    ) -> Result<WizardSnapshot, WizardControllerError> {
        self.ensure_idle()?;
        let event = WizardEvent::SetDocument {
            slot,
            filled: false,
        };
        let session_id = self.check(&event).await?;
        self.documents.discard(session_id, slot).await?;
        self.run(event).await
    }

    /// Apply a user event.
    ///
    /// Submission results are produced by the controller itself and document
    /// slots change only through storage, so neither is accepted here.
    async fn dispatch(&self, event: WizardEvent) -> Result<WizardSnapshot, WizardControllerError> {
        self.ensure_idle()?;
        if matches!(
            event,
            WizardEvent::SubmissionSucceeded
                | WizardEvent::SubmissionFailed { .. }
                | WizardEvent::SetDocument { .. }
        ) {
            let step = self.session.lock().await.current_step;
            warn!(event = event.name(), "controller-owned event rejected");
            return Err(WizardError::IllegalTransition {
                step,
                event: event.name(),
            }
            .into());
        }
        self.run(event).await
    }

    /// Apply `event` and run the actions it produces.
    async fn run(&self, event: WizardEvent) -> Result<WizardSnapshot, WizardControllerError> {
        let span = info_span!("usecase.wizard_controller.dispatch", event = event.name());
        async {
            let mut pending_actions = self.apply(event).await?;
            while let Some(action) = pending_actions.pop() {
                pending_actions.extend(self.execute(action).await?);
            }
            Ok::<_, WizardControllerError>(self.snapshot().await)
        }
        .instrument(span)
        .await
    }

    fn ensure_idle(&self) -> Result<(), WizardControllerError> {
        if self.guard.is_pending() {
            warn!("wizard operation refused: registration submission in flight");
            return Err(WizardControllerError::SubmissionBusy);
        }
        Ok(())
    }

    async fn apply(&self, event: WizardEvent) -> Result<Vec<WizardAction>, WizardError> {
        let mut session = self.session.lock().await;
        let from = session.current_step;
        let event_name = event.name();
        let (next, actions) = self.machine.transition(&session, event).map_err(|err| {
            warn!(error = %err, "wizard transition rejected");
            err
        })?;
        info!(from = ?from, to = ?next.current_step, event = event_name, "wizard state transition");
        if !next.field_errors.is_empty() {
            debug!(errors = ?next.field_errors, "wizard step has field errors");
        }
        *session = next;
        Ok(actions)
    }

    async fn execute(&self, action: WizardAction) -> Result<Vec<WizardAction>, WizardControllerError> {
        match action {
            WizardAction::SubmitRegistration { payload } => {
                debug!(role = ?payload.role, "submitting registration");
                let identity = Arc::clone(&self.identity);
                let outcome = self
                    .guard
                    .submit(payload, |payload| async move { identity.register(payload).await })
                    .await
                    .map_err(|err| {
                        warn!(error = %err, "registration submit refused");
                        WizardControllerError::SubmissionBusy
                    })?;

                let follow_up = match outcome {
                    SubmissionOutcome::Succeeded(()) => WizardEvent::SubmissionSucceeded,
                    SubmissionOutcome::Failed { reason } => WizardEvent::SubmissionFailed { reason },
                };
                // The outcome stays pending until the session reflects it.
                let applied = self.apply(follow_up).await;
                if let Err(err) = self.guard.acknowledge() {
                    warn!(error = %err, "failed to acknowledge registration outcome");
                }
                Ok(applied?)
            }
        }
    }

    /// Dry-run `event` against the current session and return its id.
    async fn check(&self, event: &WizardEvent) -> Result<Uuid, WizardError> {
        let session = self.session.lock().await;
        self.machine.transition(&session, event.clone())?;
        Ok(session.id)
    }
}
