pub mod api;
pub mod media;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::state::AppState;

/// Uploads carry whole video files.
const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/devices", get(api::list_devices))
        .route("/api/all_status", post(api::all_status))
        .route("/api/cast", post(api::cast))
        .route("/api/control", post(api::control))
        .route("/api/media", get(api::list_media))
        .route("/api/upload", post(api::upload))
        .route("/api/delete", post(api::delete))
        .route(
            "/media/{filename}",
            get(media::serve_media_get).head(media::serve_media_head),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
