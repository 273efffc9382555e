use std::path::PathBuf;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use http_range_header::parse_range_header;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::http::state::AppState;
use crate::media::mime;

/// Resolve a request filename to (path, mime), refusing traversal attempts
/// and unrecognized file types. All misses collapse to None — the handler
/// answers 404 without distinguishing why.
fn lookup(state: &AppState, filename: &str) -> Option<(PathBuf, &'static str)> {
    let path = state.store.resolve(filename).ok()?;
    let (_, mime) = mime::classify(filename)?;
    Some((path, mime))
}

/// Standard headers for all media responses (GET and HEAD):
/// Content-Type, Content-Length, Accept-Ranges.
fn media_headers(mime: &'static str, file_size: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(file_size));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers
}

/// HEAD /media/{filename} — headers only, no body, no file open beyond stat.
pub async fn serve_media_head(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let Some((path, mime)) = lookup(&state, &filename) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let file_size = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    (StatusCode::OK, media_headers(mime, file_size)).into_response()
}

/// GET /media/{filename} — stream the full file, or partial content per
/// RFC 7233 when the receiver asks for a byte range (cast receivers seek
/// this way).
pub async fn serve_media_get(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    req_headers: HeaderMap,
) -> Response {
    let Some((path, mime)) = lookup(&state, &filename) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let file_size = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    let headers = media_headers(mime, file_size);

    if let Some(range_val) = req_headers.get(header::RANGE) {
        let range_str = match range_val.to_str() {
            Ok(s) => s.to_owned(),
            Err(_) => return range_not_satisfiable(file_size),
        };
        return range_response(&path, file_size, &range_str, headers).await;
    }

    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("failed to open {}: {}", path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let body = Body::from_stream(ReaderStream::new(file));
    (StatusCode::OK, headers, body).into_response()
}

fn range_not_satisfiable(file_size: u64) -> Response {
    (
        StatusCode::RANGE_NOT_SATISFIABLE,
        [(header::CONTENT_RANGE, format!("bytes */{file_size}"))],
    )
        .into_response()
}

/// Serve one byte range as 206 Partial Content. Multi-part range requests are
/// answered with the first range only; anything unparseable or out of bounds
/// gets a uniform 416.
async fn range_response(
    path: &std::path::Path,
    file_size: u64,
    range_str: &str,
    mut headers: HeaderMap,
) -> Response {
    let parsed = match parse_range_header(range_str) {
        Ok(p) => p,
        Err(_) => return range_not_satisfiable(file_size),
    };
    let ranges = match parsed.validate(file_size) {
        Ok(r) => r,
        Err(_) => return range_not_satisfiable(file_size),
    };
    let Some(first) = ranges.into_iter().next() else {
        return range_not_satisfiable(file_size);
    };

    let start = *first.start();
    let end = *first.end();
    let length = end - start + 1;

    let mut file = match tokio::fs::File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("range response: failed to open {}: {}", path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    if let Err(e) = file.seek(std::io::SeekFrom::Start(start)).await {
        tracing::error!("range response: failed to seek {}: {}", path.display(), e);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let content_range = format!("bytes {start}-{end}/{file_size}");
    headers.insert(
        header::CONTENT_RANGE,
        HeaderValue::from_str(&content_range)
            .unwrap_or_else(|_| HeaderValue::from_static("bytes 0-0/0")),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    let body = Body::from_stream(ReaderStream::new(file.take(length)));
    (StatusCode::PARTIAL_CONTENT, headers, body).into_response()
}
