//! Tokio-backed implementation of [`ProcessRunner`].
//!
//! The child is spawned directly from the argument vector (no shell) with
//! both pipes captured, as the leader of its own process group. Output is
//! drained while waiting for exit so a chatty child cannot fill a pipe and
//! stall.
//!
//! No process outlives its call:
//!
//! - exit: anything the child left behind in its group is killed, and the
//!   pipes get a short grace period to deliver buffered output
//! - timeout: the whole group is killed and the child reaped
//! - cancellation: dropping the future kills the group and the child
//! - server death (Linux): `PR_SET_PDEATHSIG` delivers SIGTERM to the child

use arclang_mcp_application::ports::process_runner::ProcessRunner;
use arclang_mcp_domain::ProcessResult;
use arclang_mcp_domain::compiler::ABNORMAL_EXIT;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// How long pipes may keep delivering output once the child has exited
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Runs commands with tokio, optionally from a fixed working directory.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    working_dir: Option<PathBuf>,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Kills the child's process group once, explicitly or on drop.
struct ProcessGroup {
    pgid: Option<u32>,
}

impl ProcessGroup {
    fn kill(&mut self) {
        let Some(pgid) = self.pgid.take() else {
            return;
        };
        #[cfg(unix)]
        {
            // ESRCH just means nothing is left in the group
            let _ = unsafe { libc::killpg(pgid as libc::pid_t, libc::SIGKILL) };
        }
        #[cfg(not(unix))]
        let _ = pgid;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Append everything readable from `pipe` to `buf` until EOF.
///
/// Cancel-safe: bytes already read stay in `buf`, unread bytes stay in the
/// pipe for the next call.
async fn read_into<R: AsyncRead + Unpin>(pipe: &mut Option<R>, buf: &mut Vec<u8>) {
    let Some(pipe) = pipe.as_mut() else {
        return;
    };
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> ProcessResult {
        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        #[cfg(unix)]
        cmd.process_group(0);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(program, error = %e, "Failed to launch process");
                return ProcessResult::launch_failed(
                    format!("Failed to launch {}: {}", program, e),
                    start.elapsed(),
                );
            }
        };
        let mut group = ProcessGroup { pgid: child.id() };

        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let waited = tokio::time::timeout(timeout, async {
            let drains = async {
                tokio::join!(read_into(&mut stdout, &mut out), read_into(&mut stderr, &mut err))
            };
            tokio::pin!(drains);
            let wait = child.wait();
            tokio::pin!(wait);

            // Exit ends the wait even if a leftover process holds a pipe open
            tokio::select! {
                status = &mut wait => status,
                _ = &mut drains => wait.await,
            }
        })
        .await;

        // Whatever the child left running dies with it
        group.kill();

        match waited {
            Ok(status) => {
                let _ = tokio::time::timeout(DRAIN_GRACE, async {
                    tokio::join!(read_into(&mut stdout, &mut out), read_into(&mut stderr, &mut err))
                })
                .await;
                let stdout = String::from_utf8_lossy(&out).into_owned();

                match status {
                    Ok(status) => {
                        let exit_status = status.code().unwrap_or(ABNORMAL_EXIT);
                        debug!(program, exit_status, "Process exited");
                        let stderr = String::from_utf8_lossy(&err).into_owned();
                        ProcessResult::exited(exit_status, stdout, stderr, start.elapsed())
                    }
                    Err(e) => {
                        warn!(program, error = %e, "Failed to wait on process");
                        ProcessResult::exited(
                            ABNORMAL_EXIT,
                            stdout,
                            format!("Failed to wait on {}: {}", program, e),
                            start.elapsed(),
                        )
                    }
                }
            }
            Err(_) => {
                warn!(program, timeout_secs = timeout.as_secs_f64(), "Process timed out, killing");
                if let Err(e) = child.kill().await {
                    debug!(program, error = %e, "Kill after timeout failed");
                }
                ProcessResult::timed_out(timeout, start.elapsed())
            }
        }
    }
}
