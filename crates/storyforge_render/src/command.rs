//! Bounded ffmpeg process execution.

use std::process::Stdio;
use std::time::Duration;
use storyforge_error::{RenderError, RenderErrorKind, StoryforgeResult};
use tokio::process::Command;
use tracing::{debug, warn};

/// Stderr lines kept in the error message when ffmpeg fails. ffmpeg is
/// chatty; the diagnosis is always near the end.
const STDERR_TAIL_LINES: usize = 12;

/// Run ffmpeg with the given arguments under a hard timeout.
///
/// `kill_on_drop` guarantees the child is terminated on every exit path,
/// including the timeout branch where the wait future is dropped.
pub(crate) async fn run_ffmpeg(args: &[String], timeout: Duration) -> StoryforgeResult<()> {
    debug!(args = ?args, timeout_secs = timeout.as_secs(), "Spawning ffmpeg");

    let child = Command::new("ffmpeg")
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| RenderError::new(RenderErrorKind::Spawn(e.to_string())))?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => {
            result.map_err(|e| RenderError::new(RenderErrorKind::Spawn(e.to_string())))?
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "ffmpeg timed out; killing child");
            return Err(RenderError::new(RenderErrorKind::Timeout(timeout.as_secs())).into());
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr
            .lines()
            .rev()
            .take(STDERR_TAIL_LINES)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(RenderError::new(RenderErrorKind::ProcessFailed(format!(
            "exit status {}: {}",
            output.status, tail
        )))
        .into());
    }

    debug!("ffmpeg exited successfully");
    Ok(())
}
