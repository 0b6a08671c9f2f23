use async_trait::async_trait;
use thiserror::Error;

use crate::auth::LoginCredentials;
use crate::registration::RegistrationPayload;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityServiceError {
    /// The service answered and refused the request.
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// External account service.
#[async_trait]
pub trait IdentityServicePort: Send + Sync {
    /// Check login credentials.
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<(), IdentityServiceError>;

    /// Finalize a registration.
    async fn register(&self, payload: RegistrationPayload) -> Result<(), IdentityServiceError>;
}
