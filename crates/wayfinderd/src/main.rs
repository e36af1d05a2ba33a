//! Wayfinder Daemon - chatbot skill webhook
//!
//! Serves tree navigation over a hierarchy sheet, direct lookups, auth,
//! settlement and random answers.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayfinderd::audit::{AuditLogger, AuditSink};
use wayfinderd::config::Config;
use wayfinderd::server::{self, AppState};

/// Wayfinder skill server
#[derive(Parser)]
#[command(name = "wayfinderd")]
#[command(about = "Wayfinder - hierarchy navigation webhook", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to /etc/wayfinder/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Listen address, overrides [server] bind
    #[arg(long)]
    bind: Option<String>,

    /// Sheet directory, overrides [data] dir
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write a default config to the given path and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wayfinderd=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(path) = cli.init_config {
        return Config::save_default(&path);
    }

    let mut config = Config::load(cli.config.as_deref());
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }

    info!(
        "Wayfinder Daemon v{} ({}) starting",
        wayfinder_shared::VERSION,
        wayfinder_shared::GIT_SHA
    );

    let audit = if config.audit.enabled {
        AuditSink::new(AuditLogger::new(&config.audit.dir).await?)
    } else {
        info!("Audit logging disabled");
        AuditSink::disabled()
    };

    let state = AppState::new(&config, audit);
    server::run(state, &config).await
}
