use anyhow::{Context, Result};
use std::net::SocketAddr;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DB_URL: &str = "sqlite://fitsense.db?mode=rwc";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub(crate) struct LlmConfig {
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) addr: SocketAddr,
    pub(crate) llm: LlmConfig,
}

pub(crate) fn database_url_from_env() -> String {
    std::env::var("FITSENSE_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string())
}

pub(crate) fn llm_config_from_env() -> Result<LlmConfig> {
    let api_key = std::env::var("GROQ_API_KEY")
        .context("missing GROQ_API_KEY; get a key from https://console.groq.com/keys")?;
    let model = std::env::var("FITSENSE_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let base_url =
        std::env::var("FITSENSE_LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let timeout_secs = match std::env::var("FITSENSE_LLM_TIMEOUT_SECS") {
        Ok(text) => text
            .parse()
            .with_context(|| format!("invalid FITSENSE_LLM_TIMEOUT_SECS: {text}"))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    Ok(LlmConfig {
        api_key,
        model,
        base_url,
        timeout_secs,
    })
}

pub(crate) fn app_config_from_env() -> Result<AppConfig> {
    let addr_text = std::env::var("FITSENSE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr_text
        .parse()
        .with_context(|| format!("invalid FITSENSE_ADDR: {addr_text}"))?;

    Ok(AppConfig {
        addr,
        llm: llm_config_from_env()?,
    })
}
