pub mod document;
pub mod event;
pub mod identity;

pub use document::InMemoryDocumentStore;
pub use event::TracingHostEventSink;
pub use identity::SimulatedIdentityService;
