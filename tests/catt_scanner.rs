use ucast::catt::scanner::parse_scan_output;

#[test]
fn banner_blank_and_valid_line_yield_one_device() {
    let raw = "Scanning Chromecasts...\n\n10.0.0.9 - Living Room - Chromecast\n";
    let devices = parse_scan_output(raw);
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, "10.0.0.9");
    assert_eq!(devices[0].name, "Living Room");
}

#[test]
fn multiple_devices_are_all_parsed() {
    let raw = "10.0.0.9 - Living Room - Chromecast\n10.0.0.10 - Kitchen - Chromecast Audio\n";
    let devices = parse_scan_output(raw);
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[1].ip, "10.0.0.10");
    assert_eq!(devices[1].name, "Kitchen");
}

#[test]
fn two_fields_are_enough() {
    let devices = parse_scan_output("10.0.0.9 - Bedroom");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "Bedroom");
}

#[test]
fn device_name_may_itself_contain_the_delimiter() {
    // splitn(3) keeps everything after the second delimiter in the model
    // field, so a two-part name still parses from its first segment.
    let devices = parse_scan_output("10.0.0.9 - Living Room - Chromecast - Ultra");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "Living Room");
}

#[test]
fn error_lines_are_skipped() {
    let raw = "Error: network unreachable\n10.0.0.9 - Living Room - Chromecast";
    let devices = parse_scan_output(raw);
    assert_eq!(devices.len(), 1);
}

#[test]
fn malformed_lines_are_silently_skipped() {
    let raw = "not a device line\n10.0.0.9 - Living Room - Chromecast\njunk";
    let devices = parse_scan_output(raw);
    assert_eq!(devices.len(), 1);
}

#[test]
fn empty_output_yields_no_devices() {
    assert!(parse_scan_output("").is_empty());
    assert!(parse_scan_output("Scanning Chromecasts...\n").is_empty());
}

#[test]
fn fields_are_trimmed() {
    let devices = parse_scan_output("  10.0.0.9  -  Living Room  - Chromecast");
    // The delimiter is " - "; surrounding whitespace on fields is trimmed.
    assert_eq!(devices[0].ip, "10.0.0.9");
    assert_eq!(devices[0].name, "Living Room");
}
