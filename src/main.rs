use anyhow::{Context, Result};
use symptom_predictor::{config, server};
use tracing::{info, warn};

/// Sets up JSON logging; `RUST_LOG` takes precedence over the configured level.
fn init_logging(configured_level: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured_level.to_string());

    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;

    let filter = tracing_subscriber::EnvFilter::try_new(&level)
        .with_context(|| format!("Invalid log filter: '{}'", level))?;
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the file, so it has to be read first
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match init_logging(&config.server.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Starting symptom predictor with log level: {}", log_level);
    info!("Model artifact: {}", config.model.path);
    if config.server.legacy_error_status {
        warn!("Legacy error status enabled: model failures will be answered with 200");
    } else {
        info!("Model failures will be answered with 500");
    }

    server::run(config).await?;

    Ok(())
}
