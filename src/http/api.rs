use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::catt::client::CONTROL_ACTIONS;
use crate::catt::scanner::Device;
use crate::catt::status::DeviceStatus;
use crate::http::state::AppState;
use crate::media::mime::MediaKind;
use crate::media::store::StoreError;
use crate::media::{mime, store, thumbs};

#[derive(Serialize)]
struct ApiMessage {
    status: &'static str,
    message: String,
}

fn ok_response(message: impl Into<String>) -> Response {
    Json(ApiMessage {
        status: "ok",
        message: message.into(),
    })
    .into_response()
}

fn error_response(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(ApiMessage {
            status: "error",
            message: message.into(),
        }),
    )
        .into_response()
}

/// GET /api/devices — scan the network and list reachable receivers.
pub async fn list_devices(State(state): State<AppState>) -> Json<Vec<Device>> {
    Json(state.client.scan().await)
}

#[derive(Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    ips: Vec<String>,
}

/// POST /api/all_status — query the given addresses concurrently and return
/// address → normalized status. Unreachable devices report as idle.
pub async fn all_status(
    State(state): State<AppState>,
    Json(req): Json<StatusRequest>,
) -> Json<HashMap<String, DeviceStatus>> {
    Json(state.client.statuses(&req.ips).await)
}

#[derive(Deserialize)]
pub struct CastRequest {
    #[serde(default)]
    device_ip: String,
    #[serde(default)]
    source: String,
}

#[derive(Serialize)]
struct CastResponse {
    status: &'static str,
    message: String,
    /// Echoed back so the UI can show the new title before the next poll.
    casting_file: String,
}

/// POST /api/cast — launch a cast and acknowledge immediately.
///
/// The media URL is built from the request's Host header, since that is the
/// address the receiver must be able to reach this server on. The spawned
/// cast process is not awaited; this endpoint confirms dispatch, not
/// playback.
pub async fn cast(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CastRequest>,
) -> Response {
    if req.device_ip.is_empty() || req.source.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "device ip and source required");
    }
    let Some(host) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        return error_response(StatusCode::BAD_REQUEST, "missing Host header");
    };

    let media_url = format!("http://{}/media/{}", host, urlencoding::encode(&req.source));
    state.client.cast(&req.device_ip, &media_url);

    Json(CastResponse {
        status: "ok",
        message: "cast dispatched".to_string(),
        casting_file: req.source,
    })
    .into_response()
}

#[derive(Deserialize)]
pub struct ControlRequest {
    #[serde(default)]
    device_ip: String,
    #[serde(default)]
    action: String,
}

/// POST /api/control — run a playback action synchronously.
///
/// The action token is checked against the allow-list before any command
/// line is built. A process-level failure still answers ok — from the UI's
/// point of view control actions are best-effort, like everything else catt.
pub async fn control(State(state): State<AppState>, Json(req): Json<ControlRequest>) -> Response {
    if req.device_ip.is_empty() || req.action.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "device ip and action required");
    }
    if !CONTROL_ACTIONS.contains(&req.action.as_str()) {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("unknown action: {}", req.action),
        );
    }

    let result = state.client.control(&req.device_ip, &req.action).await;
    if !result.success {
        tracing::warn!(
            "control '{}' on {} failed: {}",
            req.action,
            req.device_ip,
            result.output
        );
    }
    ok_response(format!("{} sent", req.action))
}

#[derive(Serialize)]
struct MediaEntry {
    filename: String,
    thumbnail_url: Option<String>,
}

/// GET /api/media — list stored files for the selection modal, generating
/// missing video thumbnails on the way. Thumbnail extraction is best-effort;
/// a file whose preview cannot be produced is still listed.
pub async fn list_media(State(state): State<AppState>) -> Response {
    let names = match state.store.list().await {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("failed to list media directory: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "cannot list media");
        }
    };

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let Some((kind, _)) = mime::classify(&name) else {
            continue;
        };
        let thumbnail_url = match kind {
            MediaKind::Image => Some(format!("/media/{}", urlencoding::encode(&name))),
            MediaKind::Video => {
                let thumb = store::thumb_name(&name);
                let video_path = state.store.root().join(&name);
                let thumb_path = state.store.root().join(&thumb);
                if thumbs::ensure_video_thumb(&state.ffmpeg, &video_path, &thumb_path).await {
                    Some(format!("/media/{}", urlencoding::encode(&thumb)))
                } else {
                    None
                }
            }
            MediaKind::Audio => None,
        };
        entries.push(MediaEntry {
            filename: name,
            thumbnail_url,
        });
    }
    Json(entries).into_response()
}

/// POST /api/upload — store a multipart file field.
///
/// The body is streamed to disk chunk by chunk; a video upload never has to
/// fit in memory. A transfer that dies mid-stream leaves nothing behind.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("bad multipart body: {e}"))
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            return error_response(StatusCode::BAD_REQUEST, "no file selected");
        };
        let (name, file) = match state.store.create(&filename).await {
            Ok(dest) => dest,
            Err(StoreError::TypeNotAllowed) => {
                return error_response(StatusCode::BAD_REQUEST, "file type not allowed")
            }
            Err(StoreError::InvalidFilename) => {
                return error_response(StatusCode::BAD_REQUEST, "invalid filename")
            }
            Err(e) => {
                tracing::error!("failed to create upload {}: {}", filename, e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not store file");
            }
        };
        return stream_field_to_file(&state, field, name, file).await;
    }
    error_response(StatusCode::BAD_REQUEST, "no file in request")
}

/// Drain one multipart field into an open file, cleaning up the partial
/// file if the transfer or a write fails.
async fn stream_field_to_file(
    state: &AppState,
    mut field: axum::extract::multipart::Field<'_>,
    name: String,
    mut file: tokio::fs::File,
) -> Response {
    let mut written: u64 = 0;
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = file.write_all(&chunk).await {
                    tracing::error!("failed writing upload {}: {}", name, e);
                    drop(file);
                    state.store.discard_partial(&name).await;
                    return error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not store file");
                }
                written += chunk.len() as u64;
            }
            Ok(None) => break,
            Err(e) => {
                drop(file);
                state.store.discard_partial(&name).await;
                return error_response(StatusCode::BAD_REQUEST, format!("upload aborted: {e}"));
            }
        }
    }
    if let Err(e) = file.flush().await {
        tracing::error!("failed flushing upload {}: {}", name, e);
        drop(file);
        state.store.discard_partial(&name).await;
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not store file");
    }
    tracing::info!("stored {} ({} bytes)", name, written);
    ok_response(format!("uploaded {name}"))
}

#[derive(Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    filename: String,
}

/// POST /api/delete — remove a stored file and its thumbnail.
pub async fn delete(State(state): State<AppState>, Json(req): Json<DeleteRequest>) -> Response {
    if req.filename.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "filename required");
    }
    match state.store.delete(&req.filename).await {
        Ok(()) => ok_response(format!("deleted {}", req.filename)),
        Err(StoreError::InvalidFilename) => {
            error_response(StatusCode::FORBIDDEN, "invalid file path")
        }
        Err(StoreError::NotFound) => error_response(StatusCode::NOT_FOUND, "file not found"),
        Err(e) => {
            tracing::error!("failed to delete {}: {}", req.filename, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not delete file")
        }
    }
}
