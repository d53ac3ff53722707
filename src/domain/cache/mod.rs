//! Cache domain - entries, configuration and the store abstraction

mod config;
mod entry;
mod repository;

pub use config::CacheConfig;
pub use entry::{CacheEntry, SimilarMatch};
pub use repository::{PutOutcome, QueryCache, StoreStats};
