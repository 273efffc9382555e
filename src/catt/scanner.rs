use serde::Serialize;

use crate::catt::status::ERROR_SENTINEL;

/// One discovered receiver. Transient — rebuilt on every scan, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub name: String,
    pub ip: String,
}

/// Delimiter between fields in a `catt scan` result line:
/// `<ip> - <name> - <model>`.
const FIELD_DELIMITER: &str = " - ";

/// Marker for catt's scan progress banner.
const SCAN_BANNER: &str = "Scanning";

/// Parse `catt scan` output into device records.
///
/// Discovery output is advisory: banner lines, blank lines, failure lines,
/// and anything that does not split into at least ip + name are silently
/// skipped. Partial results beat none.
pub fn parse_scan_output(raw: &str) -> Vec<Device> {
    let mut devices = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() || line.contains(SCAN_BANNER) || line.contains(ERROR_SENTINEL) {
            continue;
        }
        let mut fields = line.splitn(3, FIELD_DELIMITER);
        let (Some(ip), Some(name)) = (fields.next(), fields.next()) else {
            tracing::debug!("skipping malformed scan line: {:?}", line);
            continue;
        };
        devices.push(Device {
            ip: ip.trim().to_string(),
            name: name.trim().to_string(),
        });
    }
    devices
}
