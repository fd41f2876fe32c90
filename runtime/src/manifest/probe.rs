//! Existence checks for local images and manifest lists.

use cmanifest_core::error::{ManifestError, Result};
use cmanifest_core::exec::{ExecOptions, EXIT_ABSENT, EXIT_EXISTS};
use cmanifest_core::reference::TaggedRef;

use super::args;
use crate::executor::CommandExecutor;

/// Whether a local image or manifest list exists under `target`.
///
/// Probes `image exists` then `manifest exists`. Exit 0 means present,
/// 1 means absent; anything else leaves the local state unknown and is
/// reported as `ProbeAmbiguous` with the captured output.
pub async fn exists(exec: &dyn CommandExecutor, target: &TaggedRef) -> Result<bool> {
    for probe in [args::image_exists(target), args::manifest_exists(target)] {
        let outcome = exec.execute(&probe, ExecOptions::probe()).await?;
        match outcome.exit_code {
            EXIT_EXISTS => {
                tracing::debug!(
                    reference = %target,
                    probe = %probe.join(" "),
                    "Local reference exists"
                );
                return Ok(true);
            }
            EXIT_ABSENT => continue,
            code => {
                let stdout = outcome.stdout_lossy();
                let stderr = outcome.stderr_lossy();
                tracing::warn!(
                    reference = %target,
                    exit_code = code,
                    stdout = %stdout.trim(),
                    stderr = %stderr.trim(),
                    "Existence probe failed"
                );
                return Err(ManifestError::ProbeAmbiguous {
                    reference: target.full_reference(),
                    exit_code: code,
                    stdout,
                    stderr,
                });
            }
        }
    }
    Ok(false)
}
