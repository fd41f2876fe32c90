//! Command executor - the only boundary to the container tool.
//!
//! Every manifest operation is expressed as an argument vector
//! (`["manifest", "create", "repo:tag"]`) handed to a `CommandExecutor`.
//! `ToolExecutor` runs it against the configured binary; tests substitute
//! the executors from [`crate::testing`].

use std::process::Stdio;

use async_trait::async_trait;
use cmanifest_core::config::ToolConfig;
use cmanifest_core::error::{ManifestError, Result};
use cmanifest_core::exec::{CommandOutcome, ExecOptions};

/// Trait for container-tool backends.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run one invocation and wait for it to exit.
    ///
    /// With `opts.check` set, a non-zero exit is returned as
    /// `ManifestError::Execution`; otherwise the outcome is returned as-is.
    async fn execute(&self, args: &[String], opts: ExecOptions) -> Result<CommandOutcome>;
}

/// Turn a non-zero outcome into an execution error when checking is requested.
pub fn check_outcome(
    program: &str,
    args: &[String],
    opts: ExecOptions,
    outcome: CommandOutcome,
) -> Result<CommandOutcome> {
    if opts.check && !outcome.success() {
        return Err(ManifestError::Execution {
            command: render_command(program, args),
            exit_code: outcome.exit_code,
            stderr: outcome.stderr_lossy().trim().to_string(),
        });
    }
    Ok(outcome)
}

/// Render an invocation for logs and error messages.
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Executor that spawns the configured container tool.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    config: ToolConfig,
}

impl ToolExecutor {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn program(&self) -> &str {
        &self.config.binary
    }

    /// Full argument vector: global args, then the operation's args.
    fn full_args(&self, args: &[String]) -> Vec<String> {
        self.config
            .global_args
            .iter()
            .chain(args.iter())
            .cloned()
            .collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

#[async_trait]
impl CommandExecutor for ToolExecutor {
    async fn execute(&self, args: &[String], opts: ExecOptions) -> Result<CommandOutcome> {
        let full_args = self.full_args(args);
        tracing::debug!(
            command = %render_command(&self.config.binary, &full_args),
            check = opts.check,
            "Running container tool"
        );

        let mut cmd = tokio::process::Command::new(&self.config.binary);
        cmd.args(&full_args).envs(&self.config.env).stdin(Stdio::null());

        let outcome = if opts.capture_output {
            let output = cmd.output().await.map_err(|e| ManifestError::Spawn {
                program: self.config.binary.clone(),
                message: e.to_string(),
            })?;
            CommandOutcome {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: output.stdout,
                stderr: output.stderr,
            }
        } else {
            let status = cmd.status().await.map_err(|e| ManifestError::Spawn {
                program: self.config.binary.clone(),
                message: e.to_string(),
            })?;
            CommandOutcome::with_code(status.code().unwrap_or(-1))
        };

        tracing::debug!(exit_code = outcome.exit_code, "Container tool exited");
        check_outcome(&self.config.binary, &full_args, opts, outcome)
    }
}
