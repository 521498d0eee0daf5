//! API Handlers
//!
//! HTTP request handlers for each settings endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::config::Config;
use crate::error::{Result, SettingsError};
use crate::models::{
    AddResponse, AllResponse, DeleteResponse, GetResponse, HealthResponse, InvalidateResponse,
    OptionsResponse, SetResponse, StatsResponse, TempResponse, ValueRequest,
};
use crate::repository::{MemoryRepository, SettingRepository, SqliteRepository};
use crate::settings::{OptionsRegistry, SettingsStore};

/// Application state shared across all handlers.
///
/// Contains the settings store wrapped in Arc<RwLock<>> so every request
/// sees the same cache.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide settings store
    pub store: Arc<RwLock<SettingsStore>>,
    /// Providers for `func:` option references
    pub options: Arc<OptionsRegistry>,
}

impl AppState {
    /// Creates a new AppState with the given store and no option providers.
    pub fn new(store: SettingsStore) -> Self {
        Self::with_options(store, OptionsRegistry::new())
    }

    pub fn with_options(store: SettingsStore, options: OptionsRegistry) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            options: Arc::new(options),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses SQLite when `database_path` is set, the in-memory repository otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let repository: Arc<dyn SettingRepository> = match &config.database_path {
            Some(path) => Arc::new(SqliteRepository::open(path)?),
            None => Arc::new(MemoryRepository::new()),
        };
        let store = SettingsStore::new(repository, Arc::new(config.fallback()));
        Ok(Self::new(store))
    }
}

/// Handler for GET /settings
///
/// Returns every cached setting, loading all persisted settings when the cache is empty.
pub async fn get_all_handler(State(state): State<AppState>) -> Result<Json<AllResponse>> {
    let mut store = state.store.write().await;
    let settings = store.get_all()?;

    Ok(Json(AllResponse::new(settings)))
}

/// Handler for GET /settings/:key
///
/// Resolves a setting through cache, repository and config fallback.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a miss populates the cache
    let mut store = state.store.write().await;
    let value = store
        .get(&key)?
        .ok_or_else(|| SettingsError::NotFound(key.clone()))?;
    let source = store.entry(&key).map(|entry| entry.source);

    Ok(Json(GetResponse::new(key, value, source)))
}

/// Handler for PUT /settings/:key
///
/// Sets a setting, persisting it when the value is a scalar.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<SetResponse>> {
    let value = req.into_value().map_err(SettingsError::InvalidRequest)?;
    let persistable = value.is_scalar();

    let mut store = state.store.write().await;
    if !store.set(&key, value)? {
        return Err(SettingsError::InvalidRequest(
            "Key cannot be empty".to_string(),
        ));
    }

    Ok(Json(SetResponse::new(key, persistable)))
}

/// Handler for PUT /settings/:key/temp
///
/// Overrides a setting in the cache only.
pub async fn temp_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<TempResponse>> {
    let value = req.into_value().map_err(SettingsError::InvalidRequest)?;

    let mut store = state.store.write().await;
    store.temp(&key, value);
    info!("Temporary override for setting '{}'", key);

    Ok(Json(TempResponse::new(key)))
}

/// Handler for POST /settings
///
/// Adds a new persisted setting from a JSON object of setting columns.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<AddResponse>)> {
    let slug = fields
        .get("slug")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut store = state.store.write().await;
    let id = store.add(fields)?;

    Ok((StatusCode::CREATED, Json(AddResponse { id, slug })))
}

/// Handler for DELETE /settings/:key
///
/// Deletes the persisted setting. The cached value, if any, stays in place.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut store = state.store.write().await;
    let deleted = store.delete(&key)?;

    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for GET /settings/:key/options
///
/// Resolves the select options of a persisted setting.
pub async fn options_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<OptionsResponse>> {
    let store = state.store.read().await;
    let setting = store
        .record(&key)?
        .ok_or_else(|| SettingsError::NotFound(key.clone()))?;

    Ok(Json(OptionsResponse {
        options: setting.select_options(&state.options),
        kind: setting.kind,
        key,
    }))
}

/// Handler for DELETE /cache/:key
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let mut store = state.store.write().await;
    let removed = usize::from(store.invalidate(&key));

    Json(InvalidateResponse {
        key: Some(key),
        removed,
    })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let mut store = state.store.write().await;
    let removed = store.len();
    store.clear();
    info!("Settings cache cleared ({} entries)", removed);

    Json(InvalidateResponse { key: None, removed })
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let store = state.store.read().await;

    Json(StatsResponse::from(store.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
