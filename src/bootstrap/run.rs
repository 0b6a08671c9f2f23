//! Scripted walk through the authentication surface.
//!
//! Registers an investor, then signs in with the new account, logging every
//! step. Used by the binary in place of a presentation shell.

use anyhow::Context;
use tracing::{info, info_span, Instrument};

use im_app::LoginOutcome;
use im_core::registration::{fields, DocumentUpload};
use im_core::{AuthMode, DocumentSlot, LoginCredentials, OnboardingConfig, Role, WizardStep};

use super::wiring::build_host;

const DEMO_EMAIL: &str = "ada@investmatch.example";

pub async fn run_demo(config: &OnboardingConfig) -> anyhow::Result<()> {
    let wired = build_host(config);
    let host = wired.host;

    async {
        host.open(AuthMode::Register);
        let wizard = host.wizard().context("register tab is not available")?;

        wizard.select_role(Role::Investor).await?;
        wizard.next().await?;
        for (field, value) in [
            (fields::FIRST_NAME, "Ada"),
            (fields::LAST_NAME, "Lovelace"),
            (fields::EMAIL, DEMO_EMAIL),
            (fields::PHONE, "+44 20 7946 0000"),
            (fields::COUNTRY, "uk"),
        ] {
            wizard.edit_field(field, value).await?;
        }
        let snapshot = wizard.next().await?;
        anyhow::ensure!(
            snapshot.session.current_step == WizardStep::DocumentUpload,
            "personal info rejected: {:?}",
            snapshot.session.field_errors
        );

        wizard
            .attach_document(
                DocumentSlot::Identity,
                DocumentUpload {
                    file_name: "passport.pdf".to_string(),
                    content_type: "application/pdf".to_string(),
                    bytes: b"%PDF-1.7 demo passport".to_vec(),
                },
            )
            .await?;

        let done = host.submit_registration().await?;
        anyhow::ensure!(
            done.session.current_step == WizardStep::Complete,
            "registration did not complete: {:?}",
            done.session.last_failure
        );
        info!(mode = ?host.active_mode(), "registration finished");

        let outcome = host
            .submit_login(LoginCredentials::new(DEMO_EMAIL, "correct horse battery staple", true))
            .await?;
        anyhow::ensure!(outcome == LoginOutcome::SignedIn, "login failed: {outcome:?}");
        info!(open = host.is_open(), "demo finished");
        Ok::<_, anyhow::Error>(())
    }
    .instrument(info_span!("bootstrap.run_demo"))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_run_demo_completes_with_default_config() {
        run_demo(&OnboardingConfig::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_demo_fails_when_registration_times_out() {
        let mut config = OnboardingConfig::default();
        config.simulation.identity_latency_ms = 200;
        config.submission.timeout_ms = 10;

        let err = run_demo(&config).await.unwrap_err();
        assert!(err.to_string().contains("registration did not complete"));
    }
}
