//! Raw result of one external process invocation

use std::time::Duration;

/// Exit status reported when the process did not exit on its own.
pub const ABNORMAL_EXIT: i32 = -1;

/// How the invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The process exited (with any status, including a signal death)
    Exited,
    /// The wall-clock budget expired and the process was killed
    TimedOut,
    /// The binary could not be started
    LaunchFailed,
}

/// Captured output of one invocation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
    pub termination: Termination,
}

impl ProcessResult {
    pub fn exited(exit_status: i32, stdout: String, stderr: String, elapsed: Duration) -> Self {
        Self {
            exit_status,
            stdout,
            stderr,
            elapsed,
            termination: Termination::Exited,
        }
    }

    pub fn timed_out(timeout: Duration, elapsed: Duration) -> Self {
        Self {
            exit_status: ABNORMAL_EXIT,
            stdout: String::new(),
            stderr: format!("Timeout: command timed out after {} seconds", timeout.as_secs_f64()),
            elapsed,
            termination: Termination::TimedOut,
        }
    }

    pub fn launch_failed(error: impl std::fmt::Display, elapsed: Duration) -> Self {
        Self {
            exit_status: ABNORMAL_EXIT,
            stdout: String::new(),
            stderr: error.to_string(),
            elapsed,
            termination: Termination::LaunchFailed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.termination == Termination::Exited && self.exit_status == 0
    }
}
