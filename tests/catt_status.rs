use ucast::catt::status::{parse_status, PlayerState};

#[test]
fn error_sentinel_maps_to_idle() {
    let status = parse_status("Error: Unable to connect to 10.0.0.5");
    assert_eq!(status.state, PlayerState::Idle);
    assert_eq!(status.title, None);
}

#[test]
fn nothing_playing_phrase_maps_to_idle() {
    let status = parse_status("No media is currently playing");
    assert_eq!(status.state, PlayerState::Idle);
    assert_eq!(status.title, None);
}

#[test]
fn idle_detection_wins_over_playback_signals() {
    // Even with PLAYING and a title in the text, the sentinel takes precedence
    // and the idle invariant (no title) holds.
    let raw = "Error: something\nState: PLAYING\nTitle: Stale Title";
    let status = parse_status(raw);
    assert_eq!(status.state, PlayerState::Idle);
    assert_eq!(status.title, None);
}

#[test]
fn playing_is_detected_case_insensitively() {
    for raw in ["State: PLAYING", "state: playing", "Now Playing something"] {
        let status = parse_status(raw);
        assert_eq!(status.state, PlayerState::Playing, "raw: {raw}");
    }
}

#[test]
fn paused_is_detected_case_insensitively() {
    let status = parse_status("state: paused\nVolume: 40");
    assert_eq!(status.state, PlayerState::Paused);
}

#[test]
fn playing_wins_over_paused_when_both_present() {
    let status = parse_status("PLAYING (was PAUSED)");
    assert_eq!(status.state, PlayerState::Playing);
}

#[test]
fn no_signal_degrades_to_unknown_without_title() {
    let status = parse_status("Volume: 85\nVolume muted: False");
    assert_eq!(status.state, PlayerState::Unknown);
    assert_eq!(status.title, None);
}

#[test]
fn title_from_media_url_is_decoded_and_query_stripped() {
    let raw = "State: PLAYING\nContent ID: http://10.0.0.2:5000/media/My%20Clip.mp4?x=1";
    let status = parse_status(raw);
    assert_eq!(status.state, PlayerState::Playing);
    assert_eq!(status.title.as_deref(), Some("My Clip.mp4"));
}

#[test]
fn media_url_fragment_stops_at_ampersand() {
    let raw = "PLAYING http://h/media/clip.mp4&loop=1";
    let status = parse_status(raw);
    assert_eq!(status.title.as_deref(), Some("clip.mp4"));
}

#[test]
fn media_url_is_preferred_over_title_label() {
    let raw = "PLAYING\nTitle: Embedded Metadata\nContent ID: http://h/media/actual.mp4";
    let status = parse_status(raw);
    assert_eq!(status.title.as_deref(), Some("actual.mp4"));
}

#[test]
fn first_media_fragment_wins() {
    let raw = "PLAYING /media/first.mp4 and /media/second.mp4";
    let status = parse_status(raw);
    assert_eq!(status.title.as_deref(), Some("first.mp4"));
}

#[test]
fn title_label_fallback_when_no_media_url() {
    let raw = "State: PLAYING\nTitle: Evening News\nVolume: 50";
    let status = parse_status(raw);
    assert_eq!(status.title.as_deref(), Some("Evening News"));
}

#[test]
fn title_label_matches_mid_line_on_literal_label() {
    let raw = "PAUSED\nCurrent Title: The Movie";
    let status = parse_status(raw);
    assert_eq!(status.title.as_deref(), Some("The Movie"));
}

#[test]
fn empty_title_label_yields_no_title() {
    let raw = "PLAYING\nTitle:   ";
    let status = parse_status(raw);
    assert_eq!(status.title, None);
}

#[test]
fn undecodable_fragment_yields_no_title_and_skips_fallback() {
    // %FF is not valid UTF-8 after decoding; the fragment is untrustworthy,
    // and the metadata fallback must NOT kick in.
    let raw = "PLAYING\nContent ID: http://h/media/bad%FFname.mp4\nTitle: Should Not Appear";
    let status = parse_status(raw);
    assert_eq!(status.state, PlayerState::Playing);
    assert_eq!(status.title, None);
}

#[test]
fn serializes_with_uppercase_state_and_nullable_title() {
    let status = parse_status("State: PLAYING\nTitle: News");
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["state"], "PLAYING");
    assert_eq!(json["title"], "News");

    let idle = parse_status("Error: down");
    let json = serde_json::to_value(&idle).unwrap();
    assert_eq!(json["state"], "IDLE");
    assert!(json["title"].is_null());
}
