//! # Dependency Injection / 依赖注入模块
//!
//! Assembles the authentication surface from the configuration and the
//! infrastructure adapters. No decisions are made here.

use std::sync::Arc;

use im_app::{AuthHostController, HostDependencies};
use im_core::ports::HostEventPort;
use im_core::{OnboardingConfig, OpenSurface, StepSchemas};
use im_infra::{InMemoryDocumentStore, SimulatedIdentityService, TracingHostEventSink};

/// The wired host together with the concrete adapters behind its ports.
pub struct WiredHost {
    pub host: Arc<AuthHostController>,
    pub identity: Arc<SimulatedIdentityService>,
    pub documents: Arc<InMemoryDocumentStore>,
}

/// Build an authentication surface backed by the simulated adapters.
pub fn build_host(config: &OnboardingConfig) -> WiredHost {
    build_host_with_events(config, Arc::new(TracingHostEventSink))
}

pub fn build_host_with_events(
    config: &OnboardingConfig,
    events: Arc<dyn HostEventPort>,
) -> WiredHost {
    let identity = Arc::new(SimulatedIdentityService::from_millis(
        config.simulation.identity_latency_ms,
    ));
    let documents = Arc::new(InMemoryDocumentStore::new());

    let deps = HostDependencies {
        identity: identity.clone(),
        documents: documents.clone(),
        events,
        schemas: StepSchemas::new(&config.validation),
        submission_timeout: config.submission.timeout(),
    };
    let surface = OpenSurface {
        mode: config.surface.default_mode,
        open: config.surface.open_on_start,
    };

    WiredHost {
        host: Arc::new(AuthHostController::new(deps, surface)),
        identity,
        documents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im_core::AuthMode;

    #[test]
    fn test_build_host_honours_surface_config() {
        let mut config = OnboardingConfig::default();
        config.surface.default_mode = AuthMode::Register;
        config.surface.open_on_start = false;

        let wired = build_host(&config);

        assert!(!wired.host.is_open());
        assert_eq!(wired.host.active_mode(), AuthMode::Register);
    }
}
