//! Onboarding configuration domain model
//!
//! Pure data: every section falls back to the values the platform ships with
//! when a key is missing from the file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::AuthMode;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    pub validation: ValidationConfig,
    pub submission: SubmissionConfig,
    pub surface: SurfaceConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
}

/// Allowed values and bounds used by the step schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Country codes accepted by the personal info step.
    pub countries: Vec<String>,
    /// Business type codes accepted by the business info step.
    pub business_types: Vec<String>,
    /// Earliest accepted founding year. The latest is the current year.
    pub earliest_founded_year: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            countries: ["us", "ca", "uk", "au", "de", "fr", "jp"]
                .into_iter()
                .map(String::from)
                .collect(),
            business_types: [
                "startup",
                "small_business",
                "corporation",
                "partnership",
                "nonprofit",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            earliest_founded_year: 1800,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Host-imposed submission timeout in milliseconds; 0 disables it.
    pub timeout_ms: u64,
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// How the authentication surface is presented on start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub default_mode: AuthMode,
    pub open_on_start: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            default_mode: AuthMode::Login,
            open_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the log file; empty means stdout only.
    pub directory: PathBuf,
}

/// Knobs of the simulated collaborators used by the demo wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub identity_latency_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            identity_latency_ms: 1500,
        }
    }
}
