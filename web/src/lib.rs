use std::sync::Arc;

use domain::gateway::oauth::{ProfileFetcher, Registry, TokenExchanger};
use log::*;
use service::config::Config;
use tokio::net::TcpListener;

mod controller;
mod error;
pub(crate) mod router;

pub use error::{Error, Result};

// Request state shared by every handler. The registry is read-only after
// start-up; the exchanger and fetcher default to the registry itself.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    registry: Arc<Registry>,
    exchanger: Arc<dyn TokenExchanger>,
    fetcher: Arc<dyn ProfileFetcher>,
}

impl AppState {
    pub fn new(config: Config, registry: Registry) -> Self {
        let registry = Arc::new(registry);
        Self {
            config,
            exchanger: registry.clone(),
            fetcher: registry.clone(),
            registry,
        }
    }

    /// Replace the token exchanger, e.g. with a stub in tests.
    pub fn with_exchanger(mut self, exchanger: Arc<dyn TokenExchanger>) -> Self {
        self.exchanger = exchanger;
        self
    }

    /// Replace the profile fetcher, e.g. with a stub in tests.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ProfileFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn registry(&self) -> &Registry {
        self.registry.as_ref()
    }

    pub fn exchanger(&self) -> &dyn TokenExchanger {
        self.exchanger.as_ref()
    }

    pub fn fetcher(&self) -> &dyn ProfileFetcher {
        self.fetcher.as_ref()
    }
}

/// Bind the configured interface and port and serve requests until Ctrl-C.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let listen_addr = format!("{}:{}", interface, app_state.config.port);

    if app_state.registry().is_empty() {
        warn!("No identity providers are configured, every login route will return 404");
    }

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Server starting... listening for connections on http://{listen_addr}");

    axum::serve(listener, router::define_routes(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => error!("Failed to listen for the shutdown signal: {e}"),
    }
}
