mod simulated;

pub use simulated::SimulatedIdentityService;
