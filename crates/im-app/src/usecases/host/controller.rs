//! Authentication surface host.
//!
//! Owns the open/closed flag and the active tab, and builds a fresh
//! controller tree whenever the user switches tabs or reopens the surface.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use im_core::{
    ports::{DocumentStoragePort, HostEventPort, IdentityServicePort},
    AuthMode, HostEvent, LoginCredentials, OpenSurface, RegistrationStateMachine, StepSchemas,
    WizardStep,
};

use super::login::{LoginFlow, LoginOutcome, LoginSnapshot};
use crate::usecases::submission::SubmissionGuardError;
use crate::usecases::wizard::{WizardController, WizardControllerError, WizardSnapshot};

/// Errors produced by the authentication host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("the authentication surface is closed")]
    SurfaceClosed,
    #[error("operation requires {expected:?} mode but the surface is in {actual:?} mode")]
    WrongMode { expected: AuthMode, actual: AuthMode },
    #[error("a login is already in flight")]
    LoginBusy,
    #[error(transparent)]
    Wizard(#[from] WizardControllerError),
}

/// Collaborators shared by every controller tree the host builds.
#[derive(Clone)]
pub struct HostDependencies {
    pub identity: Arc<dyn IdentityServicePort>,
    pub documents: Arc<dyn DocumentStoragePort>,
    pub events: Arc<dyn HostEventPort>,
    pub schemas: StepSchemas,
    pub submission_timeout: Option<Duration>,
}

struct HostState {
    open: bool,
    mode: AuthMode,
    wizard: Option<Arc<WizardController>>,
    login: Arc<LoginFlow>,
}

/// Builds the per-tab controllers.
struct TreeFactory {
    identity: Arc<dyn IdentityServicePort>,
    documents: Arc<dyn DocumentStoragePort>,
    machine: RegistrationStateMachine,
    submission_timeout: Option<Duration>,
}

impl TreeFactory {
    fn build(&self, open: bool, mode: AuthMode) -> HostState {
        let wizard = (open && mode == AuthMode::Register).then(|| {
            Arc::new(WizardController::new(
                self.machine.clone(),
                Arc::clone(&self.identity),
                Arc::clone(&self.documents),
                self.submission_timeout,
            ))
        });
        HostState {
            open,
            mode,
            wizard,
            login: Arc::new(LoginFlow::new(self.submission_timeout)),
        }
    }
}

/// Controller of one authentication surface.
pub struct AuthHostController {
    trees: TreeFactory,
    events: Arc<dyn HostEventPort>,
    state: Mutex<HostState>,
}

impl AuthHostController {
    pub fn new(deps: HostDependencies, surface: OpenSurface) -> Self {
        let trees = TreeFactory {
            identity: deps.identity,
            documents: deps.documents,
            machine: RegistrationStateMachine::new(deps.schemas),
            submission_timeout: deps.submission_timeout,
        };
        let state = trees.build(surface.open, surface.mode);
        info!(mode = ?surface.mode, open = surface.open, "authentication surface created");
        Self {
            trees,
            events: deps.events,
            state: Mutex::new(state),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    pub fn active_mode(&self) -> AuthMode {
        self.state().mode
    }

    pub fn surface(&self) -> OpenSurface {
        let state = self.state();
        OpenSurface {
            mode: state.mode,
            open: state.open,
        }
    }

    /// Present the surface in `mode`.
    ///
    /// A closed surface is reopened with a fresh controller tree; an open one
    /// behaves like [`set_mode`](Self::set_mode).
    pub fn open(&self, mode: AuthMode) {
        let mut state = self.state();
        if state.open && state.mode == mode {
            return;
        }
        *state = self.trees.build(true, mode);
        info!(mode = ?mode, "authentication surface opened");
    }

    /// Close the surface. `Closed` is raised once, however often this is called.
    pub fn close(&self) {
        if self.close_surface() {
            self.events.emit(HostEvent::Closed);
        }
    }

    /// Switch tabs. The tree of the mode being entered always starts fresh.
    pub fn set_mode(&self, mode: AuthMode) -> Result<(), HostError> {
        let mut state = self.state();
        if !state.open {
            return Err(HostError::SurfaceClosed);
        }
        if state.mode == mode {
            return Ok(());
        }
        info!(from = ?state.mode, to = ?mode, "authentication mode switched");
        *state = self.trees.build(true, mode);
        Ok(())
    }

    /// The registration wizard of the current Register tab.
    pub fn wizard(&self) -> Result<Arc<WizardController>, HostError> {
        let state = self.state();
        Self::require(&state, AuthMode::Register)?;
        match &state.wizard {
            Some(wizard) => Ok(Arc::clone(wizard)),
            None => Err(HostError::WrongMode {
                expected: AuthMode::Register,
                actual: state.mode,
            }),
        }
    }

    pub fn login_snapshot(&self) -> Result<LoginSnapshot, HostError> {
        let state = self.state();
        Self::require(&state, AuthMode::Login)?;
        Ok(state.login.snapshot())
    }

    /// Submit the login form.
    ///
    /// On success the host raises `LoginSucceeded` and closes the surface.
    pub async fn submit_login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, HostError> {
        let login = {
            let state = self.state();
            Self::require(&state, AuthMode::Login)?;
            Arc::clone(&state.login)
        };

        let span = info_span!("usecase.auth_host.submit_login");
        let outcome = login
            .submit(
                &self.trees.machine.schemas().login,
                self.trees.identity.as_ref(),
                credentials,
            )
            .instrument(span)
            .await
            .map_err(|err| match err {
                SubmissionGuardError::Busy | SubmissionGuardError::OutcomeNotAcknowledged => {
                    warn!(error = %err, "login submit ignored");
                    HostError::LoginBusy
                }
            })?;

        if outcome == LoginOutcome::SignedIn {
            let current = {
                let state = self.state();
                state.open && Arc::ptr_eq(&state.login, &login)
            };
            if current {
                self.events.emit(HostEvent::LoginSucceeded);
                self.close();
            } else {
                warn!("login resolved after the login tab was reset; outcome discarded");
            }
        }
        Ok(outcome)
    }

    /// Submit the registration wizard.
    ///
    /// On completion the host switches to Login and raises `RegisterSucceeded`
    /// without closing the surface.
    pub async fn submit_registration(&self) -> Result<WizardSnapshot, HostError> {
        let wizard = self.wizard()?;
        let snapshot = wizard
            .submit()
            .instrument(info_span!("usecase.auth_host.submit_registration"))
            .await?;

        if snapshot.session.current_step == WizardStep::Complete {
            let switched = {
                let mut state = self.state();
                let current = state.open
                    && state
                        .wizard
                        .as_ref()
                        .is_some_and(|active| Arc::ptr_eq(active, &wizard));
                if current {
                    *state = self.trees.build(true, AuthMode::Login);
                }
                current
            };
            if switched {
                info!(session_id = %snapshot.session.id, "registration completed, switching to login");
                self.events.emit(HostEvent::RegisterSucceeded);
            } else {
                warn!("registration resolved after the register tab was reset");
            }
        }
        Ok(snapshot)
    }

    /// Forward a forgot-password request to the shell.
    pub fn request_password_reset(&self) -> Result<(), HostError> {
        {
            let state = self.state();
            Self::require(&state, AuthMode::Login)?;
        }
        info!("password reset requested");
        self.events.emit(HostEvent::PasswordResetRequested);
        Ok(())
    }

    fn close_surface(&self) -> bool {
        let mut state = self.state();
        if !state.open {
            return false;
        }
        let mode = state.mode;
        *state = self.trees.build(false, mode);
        info!("authentication surface closed");
        true
    }

    fn require(state: &HostState, expected: AuthMode) -> Result<(), HostError> {
        if !state.open {
            return Err(HostError::SurfaceClosed);
        }
        if state.mode != expected {
            return Err(HostError::WrongMode {
                expected,
                actual: state.mode,
            });
        }
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
