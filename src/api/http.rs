use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast::Sender as BroadcastSender;

use crate::error::ApiError;
use crate::storage::{RecordKey, WeatherReading};
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// Coordinate query parameters. The short (`lat`/`lon`) and long
/// (`Latitude`/`Longitude`) spellings are both accepted.
#[derive(Debug, Default, Deserialize)]
pub struct CoordParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<String>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<String>,
}

impl CoordParams {
    /// `Ok(None)` when neither spelling supplies both halves of the pair.
    pub fn coordinate(&self) -> ApiResult<Option<(f64, f64)>> {
        let pair = match (present(&self.lat), present(&self.lon)) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => match (present(&self.latitude), present(&self.longitude)) {
                (Some(lat), Some(lon)) => Some((lat, lon)),
                _ => None,
            },
        };
        let Some((lat, lon)) = pair else {
            return Ok(None);
        };
        match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Ok(Some((lat, lon))),
            _ => Err(invalid_coordinates()),
        }
    }

    pub fn key(&self) -> ApiResult<Option<RecordKey>> {
        Ok(self.coordinate()?.map(|(lat, lon)| RecordKey::Coordinate { lat, lon }))
    }

    fn require_coordinate(&self) -> ApiResult<(f64, f64)> {
        self.coordinate()?.ok_or_else(invalid_coordinates)
    }

    fn require_key(&self) -> ApiResult<RecordKey> {
        let (lat, lon) = self.require_coordinate()?;
        Ok(RecordKey::Coordinate { lat, lon })
    }
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn invalid_coordinates() -> ApiError {
    ApiError::BadRequest("Invalid latitude or longitude".to_string())
}

fn coord_params(q: Result<Query<CoordParams>, QueryRejection>) -> ApiResult<CoordParams> {
    q.map(|Query(p)| p).map_err(|_| invalid_coordinates())
}

fn body(payload: Result<Json<WeatherReading>, JsonRejection>) -> ApiResult<WeatherReading> {
    payload.map(|Json(r)| r).map_err(|e| {
        tracing::debug!(error = %e, "rejected reading body");
        ApiError::BadRequest("Invalid data".to_string())
    })
}

fn station_key(id: &str) -> ApiResult<RecordKey> {
    id.parse::<i64>()
        .map(RecordKey::Station)
        .map_err(|_| ApiError::BadRequest("Invalid station id".to_string()))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/weather",
            get(list_or_find)
                .post(add_weather)
                .put(update_by_coordinate)
                .delete(delete_by_coordinate),
        )
        .route("/weather/fetch", post(fetch_weather))
        .route("/weather/:id", put(update_by_id).delete(delete_by_id))
        .layer(Extension(state))
}

/// Serve on `listener` until a message arrives on `shutdown`.
pub async fn serve(listener: TcpListener, state: Arc<AppState>, shutdown: BroadcastSender<()>) -> std::io::Result<()> {
    let app = router(state);
    let mut shutdown_sub = shutdown.subscribe();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_sub.recv().await;
        })
        .await
}

async fn health() -> &'static str {
    "ok"
}

async fn list_or_find(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<CoordParams>, QueryRejection>,
) -> ApiResult<Response> {
    let key = coord_params(query)?.key()?;
    let store = state.store.read().await;
    match key {
        None => Ok(Json(store.all()).into_response()),
        Some(key) => {
            let found = store.find(&key).ok_or(ApiError::NotFound)?;
            Ok(Json(found).into_response())
        }
    }
}

async fn add_weather(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<WeatherReading>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WeatherReading>)> {
    let reading = body(payload)?;
    tracing::debug!(id = reading.id, "appending reading");
    state.store.write().await.append(reading.clone());
    Ok((StatusCode::CREATED, Json(reading)))
}

async fn fetch_weather(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<CoordParams>, QueryRejection>,
) -> ApiResult<Json<WeatherReading>> {
    let (lat, lon) = coord_params(query)?.require_coordinate()?;
    // no lock is held while the provider round-trip is in flight
    let reading = state.source.fetch(lat, lon).await?;
    tracing::debug!(id = reading.id, lat, lon, "appending fetched reading");
    state.store.write().await.append(reading.clone());
    Ok(Json(reading))
}

async fn update_by_id(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<WeatherReading>, JsonRejection>,
) -> ApiResult<Json<WeatherReading>> {
    let reading = body(payload)?;
    replace(&state, station_key(&id)?, reading).await
}

async fn update_by_coordinate(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<CoordParams>, QueryRejection>,
    payload: Result<Json<WeatherReading>, JsonRejection>,
) -> ApiResult<Json<WeatherReading>> {
    let key = coord_params(query)?.require_key()?;
    let reading = body(payload)?;
    replace(&state, key, reading).await
}

async fn replace(state: &AppState, key: RecordKey, reading: WeatherReading) -> ApiResult<Json<WeatherReading>> {
    if !state.store.write().await.replace(&key, reading.clone()) {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(%key, "replaced reading");
    Ok(Json(reading))
}

async fn delete_by_id(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    remove(&state, station_key(&id)?).await
}

async fn delete_by_coordinate(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<CoordParams>, QueryRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let key = coord_params(query)?.require_key()?;
    remove(&state, key).await
}

async fn remove(state: &AppState, key: RecordKey) -> ApiResult<Json<serde_json::Value>> {
    if !state.store.write().await.remove(&key) {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(%key, "removed reading");
    Ok(Json(serde_json::json!({"message": "Deleted successfully"})))
}
