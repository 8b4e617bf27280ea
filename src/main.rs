use anyhow::{Context, Result};
use std::sync::Arc;
use time_mcp::clock::SystemClock;
use time_mcp::intl::{InstantFormatter, LocaleFormatter};
use time_mcp::tools::TimeTools;
use time_mcp::{http, stdio, TimeConfig, ToolDispatcher};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env for local dev (if present)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = load_config()?;

    // Logs go to stderr; stdout carries the stdio protocol.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("time_mcp={}", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting Time MCP Server");
    tracing::info!(
        "Configuration loaded: transport={}, port={}",
        config.server.transport,
        config.server.port
    );

    let formatter = LocaleFormatter::from_config(&config.locale)
        .context("invalid locale.local_timezone")?;
    tracing::info!("Local time zone: {}", formatter.resolved_time_zone());

    let tools = TimeTools::new(Arc::new(SystemClock), Arc::new(formatter));
    let dispatcher = Arc::new(ToolDispatcher::new(tools));

    let tools = dispatcher.list_tools();
    tracing::info!("Available tools: {}", tools.len());
    for tool in tools {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    match config.server.transport.to_lowercase().as_str() {
        "http" | "sse" => {
            tracing::info!(
                "Time MCP Server running with HTTP transport on port {}",
                config.server.port
            );
            http::run_http_server(dispatcher, &config).await?;
        }
        _ => {
            tracing::info!("Time MCP Server running with stdio transport");
            stdio::run_stdio_server(&dispatcher).await?;
        }
    }

    tracing::info!("Time MCP Server shutting down");
    Ok(())
}

fn load_config() -> Result<TimeConfig> {
    match std::env::var("TIME_MCP_CONFIG") {
        Ok(path) => {
            let mut config = TimeConfig::from_file(&path)
                .with_context(|| format!("failed to load config from {}", path))?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            Ok(config)
        }
        Err(_) => Ok(TimeConfig::from_env()?),
    }
}
