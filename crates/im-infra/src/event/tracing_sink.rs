use tracing::info;

use im_core::ports::HostEventPort;
use im_core::HostEvent;

/// Host event sink that only records events in the log.
///
/// Used when no presentation shell is attached, e.g. by the demo binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHostEventSink;

impl HostEventPort for TracingHostEventSink {
    fn emit(&self, event: HostEvent) {
        info!(target: "investmatch::host", ?event, "host event");
    }
}
