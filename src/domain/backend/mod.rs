//! Backend collaborator - the slow call the cache sits in front of

mod provider;

pub use provider::BackendProvider;

#[cfg(test)]
pub use provider::MockBackendProvider;
