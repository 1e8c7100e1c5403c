//! chat-relay: single-endpoint HTTP relay for OpenAI chat completions
//!
//! Forwards `POST /chat` requests to the OpenAI chat-completion API with the
//! server-held API key, so the key never reaches the browser client.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chat_relay::config::{AppConfig, API_KEY_ENV};
use chat_relay::run_server;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(version = "0.1.0")]
#[command(about = "HTTP relay that keeps the OpenAI API key server-side")]
#[command(long_about = "
chat-relay exposes a single POST /chat endpoint that forwards chat messages
to the OpenAI chat-completion API, injecting the API key from the server
environment so it never reaches the client.

Example usage:
  OPENAI_API_KEY=sk-... chat-relay run
  chat-relay check-config
  OPENAI_API_KEY=sk-... chat-relay test-upstream
")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Run {
        /// Override listen port
        #[arg(short, long)]
        port: Option<u16>,
        /// Override upstream base URL (e.g., "http://localhost:8080")
        #[arg(long)]
        upstream_url: Option<String>,
    },

    /// Validate configuration and show the effective settings
    CheckConfig,

    /// Test connection to the upstream API with the configured key
    TestUpstream,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .init();

    match cli.command {
        Commands::Run { port, upstream_url } => {
            run_relay(cli.config, port, upstream_url).await?;
        }
        Commands::CheckConfig => {
            check_config(cli.config)?;
        }
        Commands::TestUpstream => {
            test_upstream(cli.config).await?;
        }
    }

    Ok(())
}

/// Run the relay server
async fn run_relay(
    config_path: PathBuf,
    port_override: Option<u16>,
    upstream_url_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(&config_path)?;

    // Apply CLI overrides
    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(url) = upstream_url_override {
        config.upstream.url = url;
    }

    let api_key = read_api_key();
    if api_key.is_none() {
        // Still serve; each /chat request reports the configuration error
        tracing::warn!(
            "{} is not set, /chat requests will fail until it is configured",
            API_KEY_ENV
        );
    }

    run_server(config, api_key).await?;

    Ok(())
}

/// Validate configuration and print effective settings
fn check_config(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    match AppConfig::load_or_default(&config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid\n");
            println!("Server:");
            println!("  Listen: {}:{}", config.server.host, config.server.port);
            println!("\nUpstream:");
            println!("  URL: {}", config.upstream.base_url());
            println!("  TLS: {}", if config.upstream.is_tls() { "enabled" } else { "disabled" });
            println!("  Model: {}", config.upstream.model);
            println!("  Max tokens: {}", config.upstream.max_tokens);
            println!("  Temperature: {}", config.upstream.temperature);
            println!("  Timeout: {}s", config.upstream.timeout_seconds);
            println!("\nCredential:");
            // Presence only, never the value
            println!("  {}: {}", API_KEY_ENV, if read_api_key().is_some() { "set" } else { "NOT SET" });
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Test connection to the upstream API
async fn test_upstream(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default(&config_path)?;
    let models_url = format!("{}/v1/models", config.upstream.base_url());

    let api_key = match read_api_key() {
        Some(key) => key,
        None => {
            eprintln!("✗ {} is not set", API_KEY_ENV);
            std::process::exit(1);
        }
    };

    println!("Testing upstream endpoint: {}", models_url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()?;

    match client
        .get(&models_url)
        .bearer_auth(&api_key)
        .send()
        .await
    {
        Ok(resp) => {
            if resp.status().is_success() {
                println!("✓ Upstream is reachable and accepted the key");
                if let Ok(body) = resp.text().await {
                    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
                        if let Some(data) = json.get("data").and_then(|d| d.as_array()) {
                            println!("  Available models: {}", data.len());
                            for model in data.iter().take(5) {
                                if let Some(id) = model.get("id").and_then(|i| i.as_str()) {
                                    println!("    - {}", id);
                                }
                            }
                        }
                    }
                }
            } else {
                println!("✗ Upstream returned error status: {}", resp.status());
            }
        }
        Err(e) => {
            println!("✗ Failed to connect to upstream: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Read the API key from the environment; empty values count as unset
fn read_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
}
