//! Directory browser over HTTP
//!
//! Serves an HTML listing for any directory under the root plus the
//! thumbnail cache under `/thumb/`. Every request path is confined with the
//! same [`PathSandbox`](crate::sandbox::PathSandbox) the CLI uses.

pub mod listing;
pub mod state;
pub mod thumbnail;

pub use state::BrowserState;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::{Result, TaggerError};
use crate::sandbox::Existence;
use listing::ListingEntry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the browser router.
pub fn router(state: BrowserState) -> Router {
    let thumbnails = ServeDir::new(state.thumbnails());
    Router::new()
        .nest_service("/thumb", thumbnails)
        .fallback(browse)
        .with_state(Arc::new(state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: BrowserState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| TaggerError::ServerError {
            message: format!("failed to bind {}: {}", addr, e),
        })?;
    let local = listener.local_addr()?;

    tracing::info!(
        "browsing {} on http://{} (thumbnails from {})",
        state.sandbox().root().display(),
        local,
        state.thumbnails().display()
    );
    eprintln!("Server starting on http://{} ...", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TaggerError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn browse(
    State(state): State<Arc<BrowserState>>,
    uri: Uri,
) -> std::result::Result<Html<String>, (StatusCode, String)> {
    let decoded = urlencoding::decode(uri.path())
        .map_err(|_| (StatusCode::BAD_REQUEST, "invalid path encoding".to_string()))?;

    let sandbox = state.sandbox();
    let candidate = sandbox.root().join(decoded.trim_start_matches('/'));
    let key = sandbox
        .confine(&candidate, Existence::Required)
        .map_err(|e| match e {
            TaggerError::OutsideRoot { .. } => {
                tracing::warn!("rejected request outside root: {}", uri.path());
                (StatusCode::FORBIDDEN, "forbidden".to_string())
            }
            TaggerError::NotFound { .. } => (StatusCode::NOT_FOUND, "not found".to_string()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })?;

    let dir = sandbox.absolute(&key);
    if !dir.is_dir() {
        return Err((StatusCode::NOT_FOUND, "not a directory".to_string()));
    }

    let mut read_dir = tokio::fs::read_dir(&dir)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let mut entries = Vec::new();
    while let Some(child) = read_dir
        .next_entry()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
    {
        let is_dir = child
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry {
            name: child.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    listing::sort_entries(&mut entries);

    Ok(Html(listing::render(&key, &dir, &entries)))
}
