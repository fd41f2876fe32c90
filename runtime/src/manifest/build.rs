//! Manifest list construction: create, add each image, inspect.

use cmanifest_core::error::Result;
use cmanifest_core::exec::ExecOptions;
use cmanifest_core::reference::{ImageSource, TaggedRef};

use super::args;
use super::descriptor::ManifestDescriptor;
use crate::executor::CommandExecutor;

/// Create a local manifest list under `target`, add `images` in order and
/// return the inspected descriptor.
///
/// Any failing step aborts the build. A partially populated list is left in
/// local storage; removing it is up to the caller.
pub async fn create(
    exec: &dyn CommandExecutor,
    target: &TaggedRef,
    images: &[ImageSource],
) -> Result<ManifestDescriptor> {
    tracing::info!(reference = %target, images = images.len(), "Creating manifest list");
    exec.execute(&args::create(target), ExecOptions::checked()).await?;

    for image in images {
        tracing::debug!(
            reference = %target,
            image = %image,
            transport = image.transport(),
            "Adding image to manifest list"
        );
        exec.execute(&args::add(target, image), ExecOptions::checked()).await?;
    }

    let descriptor = inspect(exec, target).await?;
    tracing::info!(
        reference = %target,
        platforms = ?descriptor.platforms(),
        "Created manifest list"
    );
    Ok(descriptor)
}

/// Inspect an existing local manifest list.
pub async fn inspect(exec: &dyn CommandExecutor, target: &TaggedRef) -> Result<ManifestDescriptor> {
    let outcome = exec
        .execute(&args::inspect(target), ExecOptions::captured())
        .await?;
    ManifestDescriptor::parse(&outcome.stdout)
}
