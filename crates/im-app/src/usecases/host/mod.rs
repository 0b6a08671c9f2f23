//! Authentication surface use case.

mod controller;
mod login;

pub use controller::{AuthHostController, HostDependencies, HostError};
pub use login::{LoginOutcome, LoginSnapshot};
