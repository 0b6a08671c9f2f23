//! Single-flight submission guard.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};

use im_core::SubmissionState;

const ABANDONED_REASON: &str = "submission abandoned before completion";

/// Errors produced when a submit-intent is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionGuardError {
    #[error("a submission is already in flight")]
    Busy,
    #[error("the previous submission outcome has not been acknowledged")]
    OutcomeNotAcknowledged,
}

/// Result of one accepted submit-intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome<T> {
    Succeeded(T),
    Failed { reason: String },
}

impl<T> SubmissionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }
}

/// Allows at most one operation in flight.
///
/// `Idle → Pending → Succeeded | Failed → (acknowledge) → Idle`
///
/// The state lock is never held across the operation itself, so the pending
/// flag can be read while a submission is outstanding.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    state: Mutex<SubmissionState>,
    timeout: Option<Duration>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard whose operations fail with a timeout reason once `timeout` elapses.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
            timeout,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_pending()
    }

    /// Run `operation(payload)` unless another submission is outstanding.
    ///
    /// A refused intent never calls `operation`. An accepted intent resolves
    /// to exactly one outcome, which stays in the guard until
    /// [`acknowledge`](Self::acknowledge) is called.
    pub async fn submit<P, T, E, F, Fut>(
        &self,
        payload: P,
        operation: F,
    ) -> Result<SubmissionOutcome<T>, SubmissionGuardError>
    where
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.begin()?;
        let mut reset = AbandonReset { guard: self, armed: true };

        let span = info_span!("usecase.submission_guard.submit");
        let result = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, operation(payload)).await {
                    Ok(result) => result.map_err(|err| err.to_string()),
                    Err(_) => Err(format!("timed out after {}ms", limit.as_millis())),
                },
                None => operation(payload).await.map_err(|err| err.to_string()),
            }
        }
        .instrument(span)
        .await;
        reset.armed = false;

        let outcome = match result {
            Ok(value) => {
                info!("submission succeeded");
                *self.lock() = SubmissionState::Succeeded;
                SubmissionOutcome::Succeeded(value)
            }
            Err(reason) => {
                warn!(reason = %reason, "submission failed");
                *self.lock() = SubmissionState::Failed {
                    reason: reason.clone(),
                };
                SubmissionOutcome::Failed { reason }
            }
        };
        Ok(outcome)
    }

    /// Consume the outcome and return to `Idle`.
    ///
    /// Returns the acknowledged state. Acknowledging an idle guard is a no-op;
    /// a pending submission cannot be acknowledged.
    pub fn acknowledge(&self) -> Result<SubmissionState, SubmissionGuardError> {
        let mut state = self.lock();
        if state.is_pending() {
            return Err(SubmissionGuardError::Busy);
        }
        let previous = std::mem::take(&mut *state);
        debug!(acknowledged = ?previous, "submission outcome acknowledged");
        Ok(previous)
    }

    fn begin(&self) -> Result<(), SubmissionGuardError> {
        let mut state = self.lock();
        match &*state {
            SubmissionState::Idle => {
                *state = SubmissionState::Pending;
                debug!("submission started");
                Ok(())
            }
            SubmissionState::Pending => {
                warn!("submit-intent rejected: submission already in flight");
                Err(SubmissionGuardError::Busy)
            }
            SubmissionState::Succeeded | SubmissionState::Failed { .. } => {
                warn!("submit-intent rejected: previous outcome not acknowledged");
                Err(SubmissionGuardError::OutcomeNotAcknowledged)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Turns a dropped in-flight submission into a failure so the guard never
/// stays pending forever.
struct AbandonReset<'a> {
    guard: &'a SubmissionGuard,
    armed: bool,
}

impl Drop for AbandonReset<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("{ABANDONED_REASON}");
            *self.guard.lock() = SubmissionState::Failed {
                reason: ABANDONED_REASON.to_string(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn submit_success_waits_for_acknowledge() {
        let guard = SubmissionGuard::new();

        let outcome = guard
            .submit(21, |n| async move { Ok::<_, String>(n * 2) })
            .await
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::Succeeded(42));
        assert_eq!(guard.state(), SubmissionState::Succeeded);
        assert_eq!(
            guard.submit((), |_| async { Ok::<_, String>(()) }).await,
            Err(SubmissionGuardError::OutcomeNotAcknowledged)
        );

        assert_eq!(guard.acknowledge(), Ok(SubmissionState::Succeeded));
        assert_eq!(guard.state(), SubmissionState::Idle);
        assert!(guard
            .submit((), |_| async { Ok::<_, String>(()) })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn submit_failure_carries_reason() {
        let guard = SubmissionGuard::new();
        let outcome = guard
            .submit((), |_| async { Err::<(), _>("invalid credentials") })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed {
                reason: "invalid credentials".into()
            }
        );
        assert_eq!(
            guard.acknowledge(),
            Ok(SubmissionState::Failed {
                reason: "invalid credentials".into()
            })
        );
    }

    #[tokio::test]
    async fn submit_while_pending_never_invokes_operation_twice() {
        let guard = Arc::new(SubmissionGuard::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let first = {
            let guard = Arc::clone(&guard);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                guard
                    .submit((), move |_| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release_rx.await.map_err(|err| err.to_string())
                    })
                    .await
            })
        };

        while !guard.is_pending() {
            tokio::task::yield_now().await;
        }

        let second_calls = Arc::clone(&calls);
        let second = guard
            .submit((), move |_| async move {
                second_calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(())
            })
            .await;
        assert_eq!(second, Err(SubmissionGuardError::Busy));
        assert!(guard.is_pending());

        release_tx.send(()).unwrap();
        let first = first.await.unwrap().unwrap();
        assert!(first.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(guard.acknowledge(), Ok(SubmissionState::Succeeded));
    }

    #[tokio::test]
    async fn acknowledge_refuses_pending_state() {
        let guard = Arc::new(SubmissionGuard::new());
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let task = {
            let guard = Arc::clone(&guard);
            tokio::spawn(async move {
                guard
                    .submit((), |_| async move { release_rx.await.map_err(|e| e.to_string()) })
                    .await
            })
        };
        while !guard.is_pending() {
            tokio::task::yield_now().await;
        }
        assert_eq!(guard.acknowledge(), Err(SubmissionGuardError::Busy));
        release_tx.send(()).unwrap();
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn submit_timeout_becomes_failure() {
        let guard = SubmissionGuard::with_timeout(Some(Duration::from_millis(100)));
        let outcome = guard
            .submit((), |_| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, String>(())
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed {
                reason: "timed out after 100ms".into()
            }
        );
    }

    #[tokio::test]
    async fn dropped_submission_does_not_stay_pending() {
        let guard = SubmissionGuard::new();
        {
            let fut = guard.submit((), |_| std::future::pending::<Result<(), String>>());
            tokio::pin!(fut);
            let polled = tokio::time::timeout(Duration::from_millis(10), &mut fut).await;
            assert!(polled.is_err());
            assert!(guard.is_pending());
        }
        assert_eq!(
            guard.state(),
            SubmissionState::Failed {
                reason: ABANDONED_REASON.into()
            }
        );
    }
}
