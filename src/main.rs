use anyhow::{Context, Result};
use blueprint_relay::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` directives when present, otherwise the configured level.
fn env_filter(level: &str) -> Result<EnvFilter> {
    let default_level = level.parse::<LevelFilter>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })?;

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env()
        .context("Invalid RUST_LOG directives")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the loaded config, so load it first
    let config = config::load()
        .await
        .context("Failed to load configuration")?;

    let filter = env_filter(&config.server.logs.level)?;
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        "Relaying to model {} at {} (log level: {})",
        config.upstream.model, config.upstream.base_url, config.server.logs.level
    );

    server::run(config).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_rejects_unknown_level() {
        let err = env_filter("loud").unwrap_err();
        assert!(err.to_string().contains("Invalid log level: 'loud'"));
    }
}
