//! Application services

mod in_flight;
mod query_cache_service;
mod sweeper;

pub use in_flight::{Flight, FollowerTicket, InFlightRegistry, LeaderGuard};
pub use query_cache_service::QueryCacheService;
pub use sweeper::ExpirySweeper;
