//! Wellspring Proposal Server
//!
//! Backend for building, reviewing, and approving service proposals:
//! stores versioned proposal documents, recomputes their pricing, diffs
//! client edits against the retained snapshot into reviewer-facing change
//! sets, and fires side-effect notifications.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod export;
pub mod notify;
pub mod pricing;
pub mod tracking;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};

/// Load .env, create the working directories, and initialize logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    let log_dir = format!("{}/logs", config.work_dir);
    std::fs::create_dir_all(&log_dir)?;

    utils::logger::init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        Some(&log_dir),
    );
    Ok(())
}

/// Print the startup banner
pub fn print_banner() {
    println!(
        "Wellspring Proposal Server v{} ({})",
        env!("CARGO_PKG_VERSION"),
        Config::from_env().environment,
    );
}
