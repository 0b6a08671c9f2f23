//! Simulated identity service
//!
//! Stands in for the account backend: every call resolves after a fixed
//! latency and succeeds unless a failure has been scripted for it.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use im_core::ports::{IdentityServiceError, IdentityServicePort};
use im_core::{LoginCredentials, RegistrationPayload};

#[derive(Debug, Default)]
struct Journal {
    failures: VecDeque<IdentityServiceError>,
    logins: Vec<String>,
    registrations: Vec<RegistrationPayload>,
}

#[derive(Debug, Default)]
pub struct SimulatedIdentityService {
    latency: Duration,
    journal: Mutex<Journal>,
}

impl SimulatedIdentityService {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            journal: Mutex::new(Journal::default()),
        }
    }

    pub fn from_millis(latency_ms: u64) -> Self {
        Self::new(Duration::from_millis(latency_ms))
    }

    /// Make the next call fail with `error`. Scripted failures are consumed
    /// in the order they were added.
    pub fn fail_next_with(&self, error: IdentityServiceError) {
        self.journal().failures.push_back(error);
    }

    /// Identifiers of every login attempt that reached the service.
    pub fn logins(&self) -> Vec<String> {
        self.journal().logins.clone()
    }

    /// Payloads of every registration that reached the service.
    pub fn registrations(&self) -> Vec<RegistrationPayload> {
        self.journal().registrations.clone()
    }

    async fn respond(&self) -> Result<(), IdentityServiceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.journal().failures.pop_front() {
            Some(error) => {
                debug!(error = %error, "simulated identity call failed");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityServicePort for SimulatedIdentityService {
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<(), IdentityServiceError> {
        info!(identifier = %credentials.identifier, "simulated login");
        self.journal().logins.push(credentials.identifier);
        self.respond().await
    }

    async fn register(&self, payload: RegistrationPayload) -> Result<(), IdentityServiceError> {
        info!(role = ?payload.role, email = %payload.personal_info.email, "simulated registration");
        self.journal().registrations.push(payload);
        self.respond().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im_core::registration::{DocumentStatePayload, PersonalInfo};
    use im_core::Role;

    fn payload() -> RegistrationPayload {
        RegistrationPayload {
            role: Role::Investor,
            personal_info: PersonalInfo {
                email: "a@b.com".into(),
                ..Default::default()
            },
            business_info: None,
            document_state: DocumentStatePayload::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn calls_resolve_after_latency() {
        let service = SimulatedIdentityService::from_millis(1500);
        let started = tokio::time::Instant::now();

        service
            .authenticate(LoginCredentials::new("a@b.com", "pw", false))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(service.logins(), vec!["a@b.com".to_string()]);
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let service = SimulatedIdentityService::default();
        service.fail_next_with(IdentityServiceError::Unavailable("maintenance".into()));
        service.fail_next_with(IdentityServiceError::Rejected("email taken".into()));

        assert_eq!(
            service.register(payload()).await,
            Err(IdentityServiceError::Unavailable("maintenance".into()))
        );
        assert_eq!(
            service.register(payload()).await,
            Err(IdentityServiceError::Rejected("email taken".into()))
        );
        assert_eq!(service.register(payload()).await, Ok(()));
        assert_eq!(service.registrations().len(), 3);
    }
}
