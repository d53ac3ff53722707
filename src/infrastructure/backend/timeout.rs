//! Time-bounded backend decorator

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::backend::BackendProvider;
use crate::domain::DomainError;

/// Fails a backend call that runs longer than `timeout`
pub struct TimeoutBackend {
    inner: Arc<dyn BackendProvider>,
    timeout: Duration,
}

impl TimeoutBackend {
    pub fn new(inner: Arc<dyn BackendProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl BackendProvider for TimeoutBackend {
    async fn call(&self, normalized_query: &str) -> Result<String, DomainError> {
        match tokio::time::timeout(self.timeout, self.inner.call(normalized_query)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.inner.provider_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Backend call timed out"
                );
                Err(DomainError::backend(format!(
                    "{} did not answer within {:?}",
                    self.inner.provider_name(),
                    self.timeout
                )))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
