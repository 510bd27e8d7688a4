//! HTTP server exposing the shipstats data directory.
//!
//! Serves the two extracted JSON files as raw bytes, plus the loadout file
//! written by the external log watcher and an overlay view that joins the
//! loadout against the data files.

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use shipstats_core::{build_overlay, DataFile, Item, LoadoutFile, Ship};

/// Server state shared across handlers.
struct AppState {
    data_dir: PathBuf,
    loadout_file: PathBuf,
}

/// Start the data server. Blocks until the process is terminated.
///
/// # Errors
/// Returns error if binding fails or the server encounters an error.
pub async fn serve(data_dir: &Path, loadout_file: &Path, host: &str, port: u16) -> Result<()> {
    let app = router(data_dir, loadout_file);

    let addr = format!("{host}:{port}");
    info!(address = %addr, data_dir = %data_dir.display(), "Starting data server");
    println!("Serving {} on http://{addr}", data_dir.display());

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router. Split out from [`serve`] so tests can drive it without
/// a listener.
pub fn router(data_dir: &Path, loadout_file: &Path) -> Router {
    let state = Arc::new(AppState {
        data_dir: data_dir.to_path_buf(),
        loadout_file: loadout_file.to_path_buf(),
    });

    Router::new()
        .route("/", get(root))
        .route(DataFile::Ships.route(), get(ships))
        .route(DataFile::Items.route(), get(items))
        .route("/api/loadout", get(loadout))
        .route("/api/overlay", get(overlay))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Handlers ---

async fn root() -> &'static str {
    "shipstats data server"
}

async fn ships(State(state): State<Arc<AppState>>) -> Response {
    data_file(&state, DataFile::Ships).await
}

async fn items(State(state): State<Arc<AppState>>) -> Response {
    data_file(&state, DataFile::Items).await
}

/// Serve one of the data files as raw bytes, without parsing it.
async fn data_file(state: &AppState, file: DataFile) -> Response {
    let path = state.data_dir.join(file.file_name());

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("{file} not found"),
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("failed to read {file}: {err}"),
            }),
        )
            .into_response(),
    }
}

async fn loadout(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read(&state.loadout_file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Json(serde_json::json!({ "loadout": null })).into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "failed to read loadout".to_string(),
            }),
        )
            .into_response(),
    }
}

async fn overlay(State(state): State<Arc<AppState>>) -> Response {
    let loadout_file: Option<LoadoutFile> = load_json(&state.loadout_file).await;

    let Some(loadout) = loadout_file.and_then(|f| f.loadout) else {
        return Json(serde_json::json!({ "overlay": null })).into_response();
    };

    // Unreadable or malformed data files degrade to empty lists; the overlay
    // then simply matches nothing.
    let ships: Vec<Ship> = load_json(&state.data_dir.join(DataFile::Ships.file_name()))
        .await
        .unwrap_or_default();
    let items: Vec<Item> = load_json(&state.data_dir.join(DataFile::Items.file_name()))
        .await
        .unwrap_or_default();

    let overlay = build_overlay(&loadout, &ships, &items);
    Json(serde_json::json!({ "overlay": overlay })).into_response()
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let bytes = tokio::fs::read(path).await.ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Ignoring unparseable JSON file");
            None
        }
    }
}
