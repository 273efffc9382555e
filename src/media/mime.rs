/// Media kind classification for stored files.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

/// Classify a filename by extension into (kind, MIME type).
///
/// Doubles as the upload allow-list: `None` means the file type is not
/// accepted and will be neither stored nor served.
pub fn classify(filename: &str) -> Option<(MediaKind, &'static str)> {
    let (_, ext) = filename.rsplit_once('.')?;
    let entry = match ext.to_ascii_lowercase().as_str() {
        "png" => (MediaKind::Image, "image/png"),
        "jpg" | "jpeg" => (MediaKind::Image, "image/jpeg"),
        "gif" => (MediaKind::Image, "image/gif"),
        "mp4" => (MediaKind::Video, "video/mp4"),
        "mkv" => (MediaKind::Video, "video/x-matroska"),
        "mov" => (MediaKind::Video, "video/quicktime"),
        "mp3" => (MediaKind::Audio, "audio/mpeg"),
        _ => return None,
    };
    Some(entry)
}
