use std::path::PathBuf;

use crate::catt::client::CattClient;
use crate::media::store::MediaStore;

/// Shared application state injected into all route handlers via
/// axum::extract::State. Everything here is config-derived and immutable —
/// concurrent requests share nothing mutable, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub client: CattClient,
    pub store: MediaStore,
    /// ffmpeg executable used for on-demand video thumbnails.
    pub ffmpeg: PathBuf,
}
