//! Trial set server for the web experiment frontend.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p stimulus-engine-server -- --materials-dir materials
//! cargo run -p stimulus-engine-server -- --config server.ron --bind 0.0.0.0:8000
//! RUST_LOG=debug cargo run -p stimulus-engine-server -- --seed 42
//! ```
//!
//! Then request a trial set:
//!
//! ```bash
//! curl 'http://127.0.0.1:3001/trials/02_acceptability_swarm?materials=swarm-000,swarm-fillers-acceptability'
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use stimulus_engine_server::{spawn_server, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serve rendered trial sets over HTTP.
#[derive(Parser)]
#[command(about = "Serve rendered psycholinguistics trial sets over HTTP")]
struct Args {
    /// RON configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, e.g. 127.0.0.1:3001.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory holding the materials JSON files.
    #[arg(long)]
    materials_dir: Option<PathBuf>,

    /// Render reproducibly from this seed.
    #[arg(long)]
    seed: Option<u64>,

    /// RON name corpus replacing the built-in names.
    #[arg(long)]
    names: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => ServerConfig::load_from_ron(path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = args.materials_dir {
        config.materials_dir = dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.names.is_some() {
        config.names_file = args.names;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::from_config(&config).map_err(|e| e.to_string())?;
    info!(
        materials_dir = %config.materials_dir.display(),
        experiments = state.registry().len(),
        seeded = config.seed.is_some(),
        "starting trial server"
    );

    let addr = spawn_server(state, config.bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.bind_addr))?;
    println!("Trial sets: http://{addr}/trials/<experiment>?materials=<exp>,<fillers>");

    tokio::signal::ctrl_c().await.map_err(|e| e.to_string())?;
    info!("shutting down");
    Ok(())
}
