//! Edge server binary.
//!
//! ```text
//!   client ──▶ listener ──▶ parse ──▶ router ─┬─▶ static_files ──▶ <root>/static/...
//!                                           ├─▶ upstream ───────▶ backend host:port
//!                                           └─▶ 404
//!   client ◀── write + close ◀── response ◀───┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use edge_server::config::{read_config, validate_config, ServerConfig};
use edge_server::lifecycle::{signals, Shutdown};
use edge_server::observability::init_logging;
use edge_server::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "edge-server")]
#[command(about = "Serve /static from disk and forward /api to one backend", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory request paths are resolved under
    #[arg(short = 's', long)]
    static_root: Option<PathBuf>,

    /// Backend host for /api
    #[arg(long)]
    backend_host: Option<String>,

    /// Backend port for /api
    #[arg(long)]
    backend_port: Option<u16>,
}

impl Cli {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(root) = self.static_root {
            config.static_files.root = root;
        }
        if let Some(host) = self.backend_host {
            config.backend.host = host;
        }
        if let Some(port) = self.backend_port {
            config.backend.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match read_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration from {}: {}", path.display(), e);
                return ExitCode::from(1);
            }
        },
        None => ServerConfig::default(),
    };
    cli.apply(&mut config);

    if let Err(errors) = validate_config(&config) {
        for e in errors {
            eprintln!("Invalid configuration: {e}");
        }
        return ExitCode::from(1);
    }

    init_logging(&config.observability.log_level);
    tracing::info!(
        port = config.listener.port,
        static_root = %config.static_files.root.display(),
        backend_host = %config.backend.host,
        backend_port = config.backend.port,
        "edge-server v0.1.0 starting"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    match server.launch(server_shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Server failed to start");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_server::config::{from_toml, ValidationError};

    #[test]
    fn flags_repair_invalid_file_values() {
        let mut config = from_toml("[backend]\nport = 0\n\n[static_files]\nroot = \"\"\n").unwrap();
        assert!(validate_config(&config).is_err());

        let cli = Cli::parse_from([
            "edge-server",
            "--backend-port",
            "9000",
            "--static-root",
            "/srv/www",
        ]);
        cli.apply(&mut config);

        assert!(validate_config(&config).is_ok());
        assert_eq!(config.backend.port, 9000);
        assert_eq!(config.static_files.root, PathBuf::from("/srv/www"));
    }

    #[test]
    fn flags_do_not_hide_other_file_errors() {
        let mut config = from_toml("[backend]\nport = 0\n\n[listener]\nbacklog = 0\n").unwrap();
        Cli::parse_from(["edge-server", "--backend-port", "9000"]).apply(&mut config);

        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ZeroBacklog]
        );
    }
}
