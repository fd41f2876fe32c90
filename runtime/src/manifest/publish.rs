//! Publishing a local manifest list to the registry.

use std::path::PathBuf;

use cmanifest_core::error::{ManifestError, Result};
use cmanifest_core::exec::ExecOptions;
use cmanifest_core::reference::{dedup_tags, TaggedRef};

use super::args;
use crate::executor::CommandExecutor;

/// Push options shared by every destination tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Force Docker v2 schema 2 and drop signatures.
    pub v2s2: bool,
    /// Where the tool writes the pushed digest. Rewritten by each push;
    /// every tag carries the same content, so the final value is the same.
    pub digest_file: Option<PathBuf>,
}

/// Push the local list built under `tags[0]` to `repository:tag` for every tag.
///
/// Pushes run in order and stop at the first failure. Repeated tags are
/// pushed once.
pub async fn push(
    exec: &dyn CommandExecutor,
    repository: &str,
    tags: &[String],
    opts: &PushOptions,
) -> Result<()> {
    let primary = tags.first().ok_or(ManifestError::NoTags)?;
    let source = TaggedRef::new(repository, primary.as_str())?;
    let destinations = dedup_tags(tags.iter().map(String::as_str))
        .into_iter()
        .map(|tag| source.with_tag(tag))
        .collect::<Result<Vec<_>>>()?;

    let base = args::push_base(&source, opts.v2s2, opts.digest_file.as_deref());
    for destination in &destinations {
        tracing::info!(
            source = %source,
            destination = %destination,
            v2s2 = opts.v2s2,
            "Pushing manifest list"
        );
        exec.execute(&args::push(&base, destination), ExecOptions::checked()).await?;
    }

    Ok(())
}
