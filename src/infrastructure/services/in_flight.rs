//! Coalescing of concurrent backend calls for the same cache key

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::domain::query::CacheKey;
use crate::domain::DomainError;

type SharedResult = Result<String, DomainError>;

/// Tracks which cache keys currently have a backend call running
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    calls: Mutex<HashMap<CacheKey, broadcast::Sender<SharedResult>>>,
}

/// Role of a request in a coalesced backend call
pub enum Flight<'a> {
    /// Must call the backend and publish the result
    Leader(LeaderGuard<'a>),
    /// Waits for the leader's result
    Follower(FollowerTicket),
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the leader for `key`, or subscribe to the call already running
    pub fn join(&self, key: &CacheKey) -> Result<Flight<'_>, DomainError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|e| DomainError::internal(format!("Failed to acquire in-flight lock: {}", e)))?;

        if let Some(sender) = calls.get(key) {
            return Ok(Flight::Follower(FollowerTicket {
                receiver: sender.subscribe(),
            }));
        }

        let (sender, _) = broadcast::channel(1);
        calls.insert(key.clone(), sender);

        Ok(Flight::Leader(LeaderGuard {
            registry: self,
            key: key.clone(),
            finished: false,
        }))
    }

    /// Number of keys with a call in progress
    pub fn len(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take(&self, key: &CacheKey) -> Option<broadcast::Sender<SharedResult>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key)
    }
}

/// Held by the request that performs the backend call.
///
/// Dropping it without calling [`LeaderGuard::finish`] releases the key and
/// wakes followers with no result, so one of them can take over the call.
pub struct LeaderGuard<'a> {
    registry: &'a InFlightRegistry,
    key: CacheKey,
    finished: bool,
}

impl LeaderGuard<'_> {
    /// Release the key and hand `result` to every follower
    pub fn finish(mut self, result: &SharedResult) {
        self.finished = true;

        if let Some(sender) = self.registry.take(&self.key) {
            // No receivers is fine: nobody joined while the call ran
            let _ = sender.send(result.clone());
        }
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.registry.take(&self.key);
        }
    }
}

/// Subscription to a leader's result
pub struct FollowerTicket {
    receiver: broadcast::Receiver<SharedResult>,
}

impl FollowerTicket {
    /// Wait for the leader's result.
    ///
    /// Returns `None` when the leader went away without publishing one, for
    /// example because its request was cancelled. The key is already released
    /// at that point, so the caller can join again.
    pub async fn wait(mut self) -> Option<SharedResult> {
        self.receiver.recv().await.ok()
    }
}
