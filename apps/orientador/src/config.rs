use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::errors::AppError;
use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Which conversation preset the driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationMode {
    /// Fixed question script with numbered options.
    Guided,
    /// The model asks its own questions, steered by system messages.
    FreeForm,
}

impl FromStr for ConversationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guiado" | "guided" => Ok(ConversationMode::Guided),
            "libre" | "free" | "free-form" => Ok(ConversationMode::FreeForm),
            other => Err(AppError::Config(format!(
                "unknown ORIENTADOR_MODE '{other}' (expected 'guiado' or 'libre')"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every setting has a default, so a bare `orientador` run talks to a local Ollama.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_base_url: String,
    pub model: String,
    pub temperature: f64,
    pub request_timeout: Duration,
    pub mode: ConversationMode,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_base_url: env_or("OLLAMA_BASE_URL", DEFAULT_BASE_URL),
            model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            temperature: env_or("OLLAMA_TEMPERATURE", &DEFAULT_TEMPERATURE.to_string())
                .parse::<f64>()
                .context("OLLAMA_TEMPERATURE must be a number")?,
            request_timeout: Duration::from_secs(
                env_or("OLLAMA_TIMEOUT_SECS", "300")
                    .parse::<u64>()
                    .context("OLLAMA_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            mode: env_or("ORIENTADOR_MODE", "guiado").parse()?,
            rust_log: env_or("RUST_LOG", "warn"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_accepts_spanish_and_english() {
        assert_eq!("guiado".parse::<ConversationMode>().unwrap(), ConversationMode::Guided);
        assert_eq!("LIBRE".parse::<ConversationMode>().unwrap(), ConversationMode::FreeForm);
        assert_eq!("free".parse::<ConversationMode>().unwrap(), ConversationMode::FreeForm);
    }

    #[test]
    fn test_mode_rejects_unknown() {
        let err = "caótico".parse::<ConversationMode>().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
