//! Simulated moderation backend

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::backend::BackendProvider;
use crate::domain::DomainError;

/// Configuration for the simulated backend and the timeout applied around it
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedBackendConfig {
    /// Answer returned for every query
    #[serde(default = "default_answer")]
    pub answer: String,

    /// Artificial latency per call in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Upper bound for a single backend call in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_answer() -> String {
    "Moderation result: SAFE".to_string()
}

fn default_latency_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SimulatedBackendConfig {
    fn default() -> Self {
        Self {
            answer: default_answer(),
            latency_ms: default_latency_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SimulatedBackendConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Stand-in for the expensive moderation call: waits, then answers
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    answer: String,
    latency: Duration,
}

impl SimulatedBackend {
    pub fn new(answer: impl Into<String>, latency: Duration) -> Self {
        Self {
            answer: answer.into(),
            latency,
        }
    }

    pub fn from_config(config: &SimulatedBackendConfig) -> Self {
        Self::new(config.answer.clone(), config.latency())
    }
}

#[async_trait]
impl BackendProvider for SimulatedBackend {
    async fn call(&self, normalized_query: &str) -> Result<String, DomainError> {
        debug!(
            query_len = normalized_query.len(),
            latency_ms = self.latency.as_millis() as u64,
            "Calling simulated backend"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.answer.clone())
    }

    fn provider_name(&self) -> &'static str {
        "simulated"
    }
}
