//! CLI module for the hybrid query cache

pub mod serve;

use clap::{Parser, Subcommand};

/// Hybrid exact + semantic cache in front of a moderation backend
#[derive(Parser)]
#[command(name = "hybrid-query-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
