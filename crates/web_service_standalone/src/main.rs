use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::config::{load_server_config, ServerConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(about = "Session-backed todo list service")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides APP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides APP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// HTTP worker threads (overrides APP_WORKERS)
    #[arg(long)]
    workers: Option<NonZeroUsize>,

    /// Idle session lifetime in seconds (overrides SESSION_IDLE_TIMEOUT_SECS)
    #[arg(long)]
    session_idle_timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(workers) = self.workers {
            config.workers = workers.get();
        }
        if let Some(secs) = self.session_idle_timeout_secs {
            config.session_idle_timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn init_tracing(debug: bool, format: LogFormat) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(true)
                    .with_file(false),
            )
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(true))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.debug, cli.log_format);

    let config = cli.apply(load_server_config());
    tracing::info!(
        host = %config.host,
        port = config.port,
        workers = config.workers,
        idle_timeout_secs = config.session_idle_timeout.as_secs(),
        "Starting standalone todo service"
    );

    web_service::server::run(config)
        .await
        .context("todo web service stopped with an error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "todo-server",
            "--port",
            "9090",
            "--session-idle-timeout-secs",
            "60",
        ])
        .unwrap();

        let config = cli.apply(ServerConfig::default());
        assert_eq!(config.port, 9090);
        assert_eq!(config.session_idle_timeout, Duration::from_secs(60));
        assert_eq!(config.host, ServerConfig::default().host);
    }

    #[test]
    fn test_cli_rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["todo-server", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_workers() {
        assert!(Cli::try_parse_from(["todo-server", "--workers", "0"]).is_err());

        let cli = Cli::try_parse_from(["todo-server", "--workers", "2"]).unwrap();
        assert_eq!(cli.apply(ServerConfig::default()).workers, 2);
    }
}
