use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::catt::runner::{self, CommandResult};
use crate::catt::scanner::{self, Device};
use crate::catt::status::{self, DeviceStatus};

/// Timeout for single-device commands (status, control).
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for network discovery, which is inherently slower than a
/// point query against one device.
const SCAN_TIMEOUT: Duration = Duration::from_secs(15);

/// Playback verbs accepted by the control endpoint. Anything else is
/// rejected before a command line is ever built.
pub const CONTROL_ACTIONS: &[&str] = &[
    "play",
    "pause",
    "play_toggle",
    "stop",
    "rewind",
    "ffwd",
    "skip",
    "volumeup",
    "volumedown",
];

/// Handle to the catt executable, carrying the per-call timeouts.
///
/// Explicit configuration instead of ambient globals: tests point `catt_path`
/// at a fake executable and shrink the timeouts. Cheap to clone; holds no
/// mutable state, so concurrent requests never contend.
#[derive(Debug, Clone)]
pub struct CattClient {
    catt_path: PathBuf,
    status_timeout: Duration,
    scan_timeout: Duration,
}

impl CattClient {
    pub fn new(catt_path: PathBuf) -> Self {
        CattClient {
            catt_path,
            status_timeout: STATUS_TIMEOUT,
            scan_timeout: SCAN_TIMEOUT,
        }
    }

    pub fn with_timeouts(
        catt_path: PathBuf,
        status_timeout: Duration,
        scan_timeout: Duration,
    ) -> Self {
        CattClient {
            catt_path,
            status_timeout,
            scan_timeout,
        }
    }

    /// Enumerate reachable receivers via `catt scan`.
    pub async fn scan(&self) -> Vec<Device> {
        let result = runner::run(&self.catt_path, &["scan"], self.scan_timeout).await;
        let devices = scanner::parse_scan_output(&result.output);
        tracing::debug!("scan found {} device(s)", devices.len());
        devices
    }

    /// Query and normalize one device's playback status.
    ///
    /// A failed or timed-out command produces the `"Error: …"` sentinel,
    /// which the parser maps to idle — an unreachable device is
    /// indistinguishable from an idle one to callers.
    pub async fn status(&self, ip: &str) -> DeviceStatus {
        let result = runner::run(&self.catt_path, &["-d", ip, "status"], self.status_timeout).await;
        status::parse_status(&result.output)
    }

    /// Query many devices concurrently, one task per address.
    ///
    /// Every address appears in the result. Per-device failures are isolated:
    /// a device that times out still shows up, as idle, and delays the batch
    /// by at most its own timeout rather than stacking serially.
    pub async fn statuses(&self, ips: &[String]) -> HashMap<String, DeviceStatus> {
        let mut tasks = JoinSet::new();
        for ip in ips {
            let client = self.clone();
            let ip = ip.clone();
            tasks.spawn(async move {
                let status = client.status(&ip).await;
                (ip, status)
            });
        }

        let mut batch = HashMap::with_capacity(ips.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((ip, status)) => {
                    batch.insert(ip, status);
                }
                Err(e) => tracing::warn!("status query task failed to join: {}", e),
            }
        }
        batch
    }

    /// Start casting `media_url` on a device, fire-and-forget.
    ///
    /// Cast sessions run as long as playback does, so the process is launched
    /// detached and never awaited — the caller gets an immediate
    /// acknowledgment, not a confirmation that playback started. Launch
    /// failures are logged and otherwise invisible, by contract.
    pub fn cast(&self, ip: &str, media_url: &str) {
        tracing::info!("casting to {}: {}", ip, media_url);
        if let Err(e) = runner::spawn_detached(&self.catt_path, &["-d", ip, "cast", media_url]) {
            tracing::warn!("failed to launch cast on {}: {}", ip, e);
        }
    }

    /// Run a playback control action synchronously and return its raw result.
    /// The action token must come from [`CONTROL_ACTIONS`]; validation happens
    /// at the HTTP boundary so this stays a thin pass-through.
    pub async fn control(&self, ip: &str, action: &str) -> CommandResult {
        runner::run(&self.catt_path, &["-d", ip, action], self.status_timeout).await
    }
}
