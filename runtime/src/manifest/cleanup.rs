//! Local reference removal.

use cmanifest_core::error::Result;
use cmanifest_core::exec::ExecOptions;
use cmanifest_core::reference::TaggedRef;

use super::args;
use crate::executor::CommandExecutor;

/// Remove the local manifest list or image stored under `target`.
///
/// Fails if nothing is stored there; only call it once existence is known.
pub async fn remove(exec: &dyn CommandExecutor, target: &TaggedRef) -> Result<()> {
    tracing::debug!(reference = %target, "Removing local reference");
    exec.execute(&args::remove(target), ExecOptions::checked()).await?;
    Ok(())
}
