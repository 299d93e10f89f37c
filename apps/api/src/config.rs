use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_FONT_PATH: &str = "public/fonts/NotoSansJP-Regular.ttf";

/// Application configuration loaded from environment variables.
/// Every value has a default; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// TrueType font used for PDF export. Read lazily on the first export.
    pub font_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            font_path: PathBuf::from(env_or("FONT_PATH", DEFAULT_FONT_PATH)),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
