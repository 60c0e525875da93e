use clap::Parser;
use tracing_subscriber::EnvFilter;
use weatherd::{run_server, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let config = Config::parse();
    run_server(config).await?;
    Ok(())
}
