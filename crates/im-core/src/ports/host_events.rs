use crate::auth::HostEvent;

/// Callbacks raised to the presentation shell.
///
/// Called synchronously, after the controller has released its own state, so
/// an implementation never observes a half-applied transition.
pub trait HostEventPort: Send + Sync {
    fn emit(&self, event: HostEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHostEvents;

impl HostEventPort for NoopHostEvents {
    fn emit(&self, _event: HostEvent) {}
}
