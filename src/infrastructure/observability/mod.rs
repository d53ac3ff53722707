//! Observability infrastructure - Metrics and logging

mod config;
mod metrics;

pub use config::{MetricsConfig, ObservabilityConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_backend_call, record_cache_evictions,
    record_cache_expirations, record_cache_request, record_cache_size, record_http_request,
    PrometheusMetrics,
};
