//! Skill gap analysis: compares the skills a job requires with the skills a candidate
//! has, and persists job descriptions, resumes, and the resulting analyses.

pub mod analysis;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Initializes structured logging. `RUST_LOG` directives win over the config default.
pub fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = &config.rust_log;
            EnvFilter::new(format!(
                "{}={level},skillgap_api={level},tower_http={level}",
                env!("CARGO_CRATE_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
