//! HTTP boundary for the stimulus engine.
//!
//! Serves rendered trial sets to the browser-based experiment runner:
//!
//! - `GET /trials/{experiment}?materials=<experimental id>,<filler id>`
//!   renders a fresh trial set and returns it as JSON.
//! - `GET /experiments` lists the registered experiment names.
//!
//! Rendering is synchronous and CPU-bound, so each request builds its own
//! engine from the shared registry and name corpus and runs it on the
//! blocking pool.
//!
//! ```ignore
//! use stimulus_engine_server::{spawn_server, AppState, ServerConfig};
//!
//! let config = ServerConfig::default();
//! let state = AppState::from_config(&config)?;
//! let addr = spawn_server(state, config.bind_addr).await?;
//! println!("Trial sets: http://{addr}/trials/02_acceptability_swarm?materials=a,b");
//! ```

mod api;
pub mod config;
pub mod error;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use stimulus_engine::core::names::NameCorpus;
use stimulus_engine::core::pipeline::{PipelineError, StimulusEngine};
use stimulus_engine::core::registry::ExperimentRegistry;
use stimulus_engine::core::store::MaterialsStore;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared application state passed to all handlers via axum's `State`
/// extractor. Everything behind it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<ExperimentRegistry>,
    names: Arc<NameCorpus>,
    store: Arc<MaterialsStore>,
    seed: Option<u64>,
    requests: Arc<AtomicU64>,
}

impl AppState {
    /// Standard experiments and the built-in name corpus over `store`.
    pub fn new(store: MaterialsStore) -> Self {
        Self {
            registry: Arc::new(ExperimentRegistry::standard()),
            names: Arc::new(NameCorpus::builtin()),
            store: Arc::new(store),
            seed: None,
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, PipelineError> {
        let mut state = Self::new(MaterialsStore::new(config.materials_dir.clone()));
        if let Some(ref path) = config.names_file {
            state.names = Arc::new(NameCorpus::load_from_ron(path)?);
        }
        state.seed = config.seed;
        Ok(state)
    }

    /// Seed rendering: request `n` (counted from startup) uses `seed + n`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn registry(&self) -> &ExperimentRegistry {
        &self.registry
    }

    pub fn store(&self) -> &MaterialsStore {
        &self.store
    }

    /// A fresh engine for one request.
    pub fn engine(&self) -> Result<StimulusEngine, PipelineError> {
        let mut builder = StimulusEngine::builder()
            .registry(Arc::clone(&self.registry))
            .names(Arc::clone(&self.names));
        if let Some(seed) = self.seed {
            let request = self.requests.fetch_add(1, Ordering::Relaxed);
            builder = builder.seed(seed.wrapping_add(request));
        }
        builder.build()
    }
}

/// Build the axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/trials/{experiment}", get(api::get_trials))
        .route("/experiments", get(api::list_experiments))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind_addr`, serve on a Tokio task, and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_server(state: AppState, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    let router = build_router(state);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            error!(%err, "server stopped");
        }
    });

    info!(%addr, "serving trial sets");
    Ok(addr)
}
