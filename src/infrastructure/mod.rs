//! Infrastructure layer - Store, backend and service implementations

pub mod backend;
pub mod cache;
pub mod logging;
pub mod observability;
pub mod services;
pub mod stats;
