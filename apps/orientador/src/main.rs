mod config;
mod errors;
mod llm_client;
mod orientation;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::orientation::driver::{ConversationDriver, DriverConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Structured logging on stderr so it never interleaves with the conversation
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Orientador v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        &config.ollama_base_url,
        config.model.clone(),
        config.temperature,
        config.request_timeout,
    );
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm.model(),
        config.ollama_base_url
    );

    let driver_config = DriverConfig::for_mode(config.mode);
    let mut driver = ConversationDriver::new(driver_config, Arc::new(llm))?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    driver.run(stdin, &mut stdout).await?;

    Ok(())
}
