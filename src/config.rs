use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{provider::DEFAULT_ENDPOINT, storage::WeatherStore};

/// Weather readings over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "weatherd", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "WEATHER_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Current-weather endpoint used by `POST /weather/fetch`.
    #[arg(long, env = "WEATHER_PROVIDER_URL", default_value = DEFAULT_ENDPOINT)]
    pub provider_url: String,

    /// OpenWeather API key, sent as `appid`.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// JSON array of readings to seed the store with instead of the built-in fixture.
    #[arg(long, env = "WEATHER_FIXTURE")]
    pub fixture: Option<PathBuf>,
}

impl Config {
    pub fn load_store(&self) -> Result<WeatherStore> {
        match &self.fixture {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
                WeatherStore::from_fixture(&text)
                    .with_context(|| format!("Failed to parse fixture file: {}", path.display()))
            }
            None => WeatherStore::seeded(),
        }
    }
}
