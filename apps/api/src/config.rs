use anyhow::{Context, Result};

use crate::analysis::gap::DenominatorPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if the hosted store credentials are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Direct Postgres connection; when set it replaces the REST backend.
    pub database_url: Option<String>,
    pub denominator: DenominatorPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            supabase_url: require(&get, "SUPABASE_URL")?,
            supabase_anon_key: require(&get, "SUPABASE_ANON_KEY")?,
            database_url: get("DATABASE_URL"),
            denominator: get("SKILLGAP_DENOMINATOR")
                .map(|v| v.parse::<DenominatorPolicy>())
                .transpose()
                .context("SKILLGAP_DENOMINATOR must be 'raw' or 'distinct'")?
                .unwrap_or_default(),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(get: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).with_context(|| {
        format!("Required environment variable '{key}' is not set. Please check your .env file.")
    })
}
