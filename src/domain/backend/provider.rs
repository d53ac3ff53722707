use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// The expensive call whose answers get cached.
///
/// Implementations may be slow and may fail; the cache never stores a failed call.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BackendProvider: Send + Sync {
    /// Produce an answer for an already normalized query
    async fn call(&self, normalized_query: &str) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
