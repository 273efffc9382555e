use serde::Serialize;

/// Normalized playback state of one receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerState {
    Idle,
    Playing,
    Paused,
    Unknown,
}

/// Normalized status of one receiver, as reported over the API.
/// Invariant: `state == Idle` implies `title == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    pub state: PlayerState,
    pub title: Option<String>,
}

impl DeviceStatus {
    pub fn idle() -> Self {
        DeviceStatus {
            state: PlayerState::Idle,
            title: None,
        }
    }
}

/// Failure marker emitted by the command runner. Its presence anywhere in a
/// status text means the device is unreachable, which callers cannot tell
/// apart from idle — so it maps to idle.
pub const ERROR_SENTINEL: &str = "Error:";

/// catt's explicit "nothing playing" phrase.
const IDLE_PHRASE: &str = "No media is currently playing";

const MEDIA_SEGMENT: &str = "/media/";
const TITLE_LABEL: &str = "Title:";

/// Classify one device's raw `catt status` output.
///
/// Ordered heuristics, first match wins:
/// 1. failure sentinel or explicit idle phrase → idle, no title, done;
/// 2. case-insensitive PLAYING, then PAUSED, else unknown;
/// 3. title from the media URL fragment, falling back to the `Title:` label.
pub fn parse_status(raw: &str) -> DeviceStatus {
    if raw.contains(ERROR_SENTINEL) || raw.contains(IDLE_PHRASE) {
        return DeviceStatus::idle();
    }

    let upper = raw.to_uppercase();
    let state = if upper.contains("PLAYING") {
        PlayerState::Playing
    } else if upper.contains("PAUSED") {
        PlayerState::Paused
    } else {
        PlayerState::Unknown
    };

    let title = extract_title(raw);
    tracing::debug!(?state, ?title, "parsed device status");
    DeviceStatus { state, title }
}

/// Title extraction, two tiers.
///
/// The filename embedded in the media URL is authoritative (it names what was
/// actually cast); the `Title:` metadata line can be stale, so it is only a
/// fallback when no URL fragment exists at all. A fragment that fails to
/// percent-decode is untrustworthy and yields no title — it does NOT fall
/// through to the metadata line.
fn extract_title(raw: &str) -> Option<String> {
    if let Some(fragment) = media_fragment(raw) {
        return match urlencoding::decode(fragment) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(e) => {
                tracing::debug!("undecodable media fragment {:?}: {}", fragment, e);
                None
            }
        };
    }
    title_label(raw)
}

/// First `/media/<filename>` fragment in the text, cut at the query string
/// (`?` or `&`) or at whitespace.
fn media_fragment(raw: &str) -> Option<&str> {
    let start = raw.find(MEDIA_SEGMENT)? + MEDIA_SEGMENT.len();
    let rest = &raw[start..];
    let end = rest
        .find(|c: char| c == '?' || c == '&' || c.is_whitespace())
        .unwrap_or(rest.len());
    let fragment = &rest[..end];
    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}

/// Remainder of the first line carrying the literal `Title:` label, trimmed.
/// Anchoring on the literal label keeps title-cased words in unrelated lines
/// from matching. An empty remainder counts as no title.
fn title_label(raw: &str) -> Option<String> {
    for line in raw.lines() {
        if let Some(idx) = line.find(TITLE_LABEL) {
            let rest = line[idx + TITLE_LABEL.len()..].trim();
            return (!rest.is_empty()).then(|| rest.to_string());
        }
    }
    None
}
