use std::future::Future;
use std::sync::Arc;
use anyhow::Context;
use tokio::sync::broadcast::Sender as BroadcastSender;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
pub mod storage;
pub mod provider;
pub mod config;
pub mod error;
pub mod api;

pub use config::Config;

/// Shared by every handler. Every store operation goes through the one lock;
/// lookups share it, writes take it exclusively.
pub struct AppState {
    pub store: RwLock<storage::WeatherStore>,
    pub source: Arc<dyn provider::WeatherSource>,
}

impl AppState {
    pub fn new(store: storage::WeatherStore, source: Arc<dyn provider::WeatherSource>) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
            source,
        })
    }
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = config.load_store()?;
    let source = provider::OpenWeatherClient::new(config.provider_url.clone(), config.api_key.clone());
    tracing::info!(records = store.len(), provider = source.endpoint(), "store seeded");
    let state = AppState::new(store, Arc::new(source));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    // broadcast channel for shutdown signaling
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    let http_shutdown = shutdown_tx.clone();
    let server = tokio::spawn(async move {
        api::http::serve(listener, state, http_shutdown).await
    });

    supervise(server, shutdown_tx, tokio::signal::ctrl_c()).await
}

/// Wait for either the server task to end on its own or `signal` to fire.
/// A server that dies early ends the process with its error; a signal
/// broadcasts shutdown and waits for the server to drain.
async fn supervise<F>(
    mut server: JoinHandle<std::io::Result<()>>,
    shutdown_tx: BroadcastSender<()>,
    signal: F,
) -> anyhow::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        res = &mut server => {
            res.context("server task failed")?.context("server error")?;
            tracing::warn!("server stopped without a shutdown signal");
            Ok(())
        }
        sig = signal => {
            sig.context("failed to listen for shutdown signal")?;
            tracing::info!("shutting down");
            let _ = shutdown_tx.send(());
            server.await.context("server task failed")?.context("server error")?;
            Ok(())
        }
    }
}
