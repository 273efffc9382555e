use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Outcome of one external command invocation.
///
/// Failures are data, not errors: every failure mode (non-zero exit, timeout,
/// unspawnable binary) collapses into `success = false` with a diagnostic in
/// `output`, prefixed with the `"Error: "` sentinel that the status parser
/// recognizes. Nothing above this layer ever sees a process error as a Result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub output: String,
}

impl CommandResult {
    fn ok(output: String) -> Self {
        CommandResult {
            success: true,
            output,
        }
    }

    fn failure(diagnostic: String) -> Self {
        CommandResult {
            success: false,
            output: format!("Error: {diagnostic}"),
        }
    }
}

/// Run `program` with `args`, waiting at most `timeout`.
///
/// The command is spawned directly (argv vector, no shell), so caller-supplied
/// values like device addresses stay confined to their own argument. On
/// timeout the child is killed and the result carries a fixed timeout notice.
/// Exactly one child process per call, no retries.
pub async fn run<S: AsRef<OsStr>>(program: &Path, args: &[S], timeout: Duration) -> CommandResult {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, output).await {
        Err(_) => {
            tracing::warn!("{} timed out after {:?}", program.display(), timeout);
            CommandResult::failure(format!("Command timed out after {timeout:?}"))
        }
        Ok(Err(e)) => {
            tracing::warn!("failed to run {}: {}", program.display(), e);
            CommandResult::failure(format!("failed to run {}: {}", program.display(), e))
        }
        Ok(Ok(out)) if out.status.success() => {
            CommandResult::ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
        }
        Ok(Ok(out)) => {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            let diagnostic = if stderr.is_empty() {
                format!("command exited with {}", out.status)
            } else {
                stderr
            };
            CommandResult::failure(diagnostic)
        }
    }
}

/// Launch `program` detached: spawn it and return without waiting.
///
/// The child's exit is collected by a background reaper task (so it never
/// lingers as a zombie) but its outcome is only logged at debug level — this
/// core has no visibility into eventual success of a detached launch.
///
/// Must be called from within a tokio runtime.
pub fn spawn_detached<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let name = program.display().to_string();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => tracing::debug!("detached {} exited with {}", name, status),
            Err(e) => tracing::debug!("detached {} could not be awaited: {}", name, e),
        }
    });
    Ok(())
}
