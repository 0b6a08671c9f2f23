//! InvestMatch onboarding
//!
//! Bootstrap for the onboarding workspace: configuration loading, tracing
//! initialisation and wiring of the authentication surface.

pub mod bootstrap;
