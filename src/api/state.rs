//! Application state shared by handlers

use std::sync::Arc;

use crate::infrastructure::services::QueryCacheService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub query_service: Arc<QueryCacheService>,
}

impl AppState {
    pub fn new(query_service: Arc<QueryCacheService>) -> Self {
        Self { query_service }
    }
}
