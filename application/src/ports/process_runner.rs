//! Process runner port
//!
//! Runs an external program with an argument vector and a wall-clock budget.

use arclang_mcp_domain::ProcessResult;
use async_trait::async_trait;
use std::time::Duration;

/// Runs one external command to completion.
///
/// Implementations never fail: a timeout or a launch failure is reported
/// through [`ProcessResult::termination`] with exit status `-1`. Dropping the
/// returned future must not leave the child running.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with exactly `args` (no shell), killing it after `timeout`.
    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> ProcessResult;
}
