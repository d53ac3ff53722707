//! Backend implementations

mod simulated;
mod timeout;

pub use simulated::{SimulatedBackend, SimulatedBackendConfig};
pub use timeout::TimeoutBackend;
