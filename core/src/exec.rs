//! Exec types for container-tool invocations.
//!
//! Shared request/outcome types used by the process-backed executor
//! and by the scripted executors in tests.

use serde::{Deserialize, Serialize};

/// Exit code the tool uses for "exists".
pub const EXIT_EXISTS: i32 = 0;

/// Exit code the tool uses for "does not exist".
pub const EXIT_ABSENT: i32 = 1;

/// Exit code the tool uses for its own internal errors.
pub const EXIT_TOOL_ERROR: i32 = 125;

/// How a single invocation should be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// Capture stdout/stderr instead of inheriting the parent's streams.
    pub capture_output: bool,
    /// Fail with an execution error when the exit code is non-zero.
    pub check: bool,
}

impl ExecOptions {
    /// Checked, output inherited. Used for mutating steps.
    pub const fn checked() -> Self {
        Self {
            capture_output: false,
            check: true,
        }
    }

    /// Checked, output captured. Used for `manifest inspect`.
    pub const fn captured() -> Self {
        Self {
            capture_output: true,
            check: true,
        }
    }

    /// Unchecked, output captured. Used only for existence probes.
    pub const fn probe() -> Self {
        Self {
            capture_output: true,
            check: false,
        }
    }
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self::checked()
    }
}

/// Result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Process exit code (-1 if terminated by a signal).
    pub exit_code: i32,
    /// Captured stdout bytes (empty when not captured).
    pub stdout: Vec<u8>,
    /// Captured stderr bytes (empty when not captured).
    pub stderr: Vec<u8>,
}

impl CommandOutcome {
    /// Outcome with the given exit code and no output.
    pub fn with_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    /// Successful outcome carrying the given stdout.
    pub fn with_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}
