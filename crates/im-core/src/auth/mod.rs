//! Authentication surface domain models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registration::fields;
use crate::validation::FieldValues;

/// Which sub-flow of the authentication surface is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// How the surface is presented when it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSurface {
    pub mode: AuthMode,
    pub open: bool,
}

impl Default for OpenSurface {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            open: true,
        }
    }
}

/// Login submit-intent payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub identifier: String,
    pub secret: String,
    pub remember_me: bool,
}

impl LoginCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>, remember_me: bool) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            remember_me,
        }
    }

    /// Form values checked by the login schema.
    pub fn form_values(&self) -> FieldValues {
        FieldValues::from([
            (fields::IDENTIFIER.to_string(), self.identifier.clone()),
            (fields::SECRET.to_string(), self.secret.clone()),
        ])
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Notifications raised to the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// `onLoginSuccess`
    LoginSucceeded,
    /// `onRegisterSuccess`
    RegisterSucceeded,
    /// `onClose`
    Closed,
    /// The user asked to recover a forgotten secret.
    PasswordResetRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_secret() {
        let credentials = LoginCredentials::new("a@b.com", "hunter2", true);
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn auth_mode_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&AuthMode::Register).unwrap(), "\"register\"");
        let mode: AuthMode = serde_json::from_str("\"login\"").unwrap();
        assert_eq!(mode, AuthMode::Login);
    }
}
