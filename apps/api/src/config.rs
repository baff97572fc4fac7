use anyhow::{Context, Result};

const DEFAULT_REGION: &str = "us-west-2";
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Region the Bedrock runtime client is pinned to.
    pub bedrock_region: String,
    /// Optional endpoint override for the Bedrock runtime (local stubs, VPC endpoints).
    pub bedrock_endpoint_url: Option<String>,
    /// Total attempts the SDK makes per model call, including the first.
    pub bedrock_max_attempts: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            bedrock_region: optional_env("BEDROCK_REGION")
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bedrock_endpoint_url: optional_env("BEDROCK_ENDPOINT_URL"),
            bedrock_max_attempts: parse_max_attempts(optional_env("BEDROCK_MAX_ATTEMPTS"))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_max_attempts(raw: Option<String>) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_ATTEMPTS);
    };
    let attempts = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("BEDROCK_MAX_ATTEMPTS must be a positive integer, got '{raw}'"))?;
    anyhow::ensure!(attempts >= 1, "BEDROCK_MAX_ATTEMPTS must be at least 1");
    Ok(attempts)
}
