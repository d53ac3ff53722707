//! Request accounting

mod recorder;

pub use recorder::StatsRecorder;
