use std::path::PathBuf;

use clap::Parser;

use fileops_server::config::{load_config, validate_config, ConfigError, LogFormat, ServerConfig};
use fileops_server::lifecycle;
use fileops_server::observability::logging;

#[derive(Parser, Debug)]
#[command(
    name = "fileops-server",
    version,
    about = "File operations and request forwarding service"
)]
struct Args {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long, env = "FILEOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long, env = "FILEOPS_BIND")]
    bind: Option<String>,

    /// Override `observability.log_format` (pretty or json).
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(format) = args.log_format {
        config.observability.log_format = format;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        forward_timeout_secs = config.forward.default_timeout_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
