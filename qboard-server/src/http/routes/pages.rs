//! Static page serving: attendee view, projector view, and assets

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::http::server::AppState;

/// Static routes. `/` is the attendee board, `/projector` the read-only
/// display that polls the list endpoint, `/static/*` the assets verbatim.
pub fn router(static_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/projector", ServeFile::new(static_dir.join("projector.html")))
        .nest_service("/static", ServeDir::new(static_dir))
}
