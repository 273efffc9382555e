use std::path::Path;
use std::time::Duration;

use crate::catt::runner;

/// Frame extraction can be slow on large files; well above the status-query
/// timeout but still bounded.
const THUMB_TIMEOUT: Duration = Duration::from_secs(20);

/// Seek position for the captured frame.
const FRAME_POSITION: &str = "00:00:05";

/// Ensure a thumbnail exists for `video` at `thumb`, extracting one frame via
/// ffmpeg if missing. Best effort: returns whether a thumbnail is present
/// afterwards; a failed extraction only costs the preview, never the listing.
pub async fn ensure_video_thumb(ffmpeg: &Path, video: &Path, thumb: &Path) -> bool {
    if thumb.exists() {
        return true;
    }

    let video_arg = video.to_string_lossy();
    let thumb_arg = thumb.to_string_lossy();
    let args = [
        "-i",
        video_arg.as_ref(),
        "-ss",
        FRAME_POSITION,
        "-vframes",
        "1",
        "-q:v",
        "3",
        "-vf",
        "scale=320:-1",
        thumb_arg.as_ref(),
        "-y",
    ];

    let result = runner::run(ffmpeg, &args, THUMB_TIMEOUT).await;
    if !result.success {
        tracing::warn!(
            "thumbnail extraction failed for {}: {}",
            video.display(),
            result.output
        );
        return false;
    }
    thumb.exists()
}
