//! `cmanifest push` command — push a local manifest list to the registry.

use std::path::PathBuf;

use clap::Args;
use cmanifest_runtime::manifest::publish;
use cmanifest_runtime::{CommandExecutor, PushOptions};

#[derive(Args)]
pub struct PushArgs {
    /// Registry repository (e.g., "quay.io/org/os")
    #[arg(long)]
    pub repo: String,

    /// Tags to push; the first one names the local manifest list
    #[arg(long = "tag", required = true)]
    pub tags: Vec<String>,

    /// Force the v2s2 media type and drop signatures
    #[arg(long)]
    pub v2s2: bool,

    /// Write the pushed manifest digest to this file
    #[arg(long)]
    pub digest_file: Option<PathBuf>,
}

pub async fn execute(
    args: PushArgs,
    exec: &dyn CommandExecutor,
) -> Result<(), Box<dyn std::error::Error>> {
    let opts = PushOptions {
        v2s2: args.v2s2,
        digest_file: args.digest_file,
    };
    publish::push(exec, &args.repo, &args.tags, &opts).await?;

    for tag in cmanifest_core::dedup_tags(args.tags.iter().map(String::as_str)) {
        println!("Pushed: {}:{}", args.repo, tag);
    }
    Ok(())
}
