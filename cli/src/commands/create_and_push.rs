//! `cmanifest create-and-push` command — full manifest lifecycle.

use std::path::PathBuf;

use clap::Args;
use cmanifest_runtime::{create_and_push, CommandExecutor, PublishRequest, PushOptions};

use crate::output;

#[derive(Args)]
pub struct CreateAndPushArgs {
    /// Registry repository (e.g., "quay.io/org/os")
    #[arg(long)]
    pub repo: String,

    /// Tags to push; the first one names the local manifest list
    #[arg(long = "tag", required = true)]
    pub tags: Vec<String>,

    /// Per-architecture images including transport (e.g., "docker://quay.io/org/os@sha256:...")
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Force the v2s2 media type and drop signatures
    #[arg(long)]
    pub v2s2: bool,

    /// Write the pushed manifest digest to this file
    #[arg(long)]
    pub digest_file: Option<PathBuf>,

    /// Print only the member count
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn execute(
    args: CreateAndPushArgs,
    exec: &dyn CommandExecutor,
) -> Result<(), Box<dyn std::error::Error>> {
    let images = super::parse_images(&args.images)?;
    let request = PublishRequest::new(args.repo, args.tags, images)?.with_push_options(
        PushOptions {
            v2s2: args.v2s2,
            digest_file: args.digest_file,
        },
    );

    if !args.quiet {
        eprintln!(
            "Publishing {} ({} images) to {} tag(s)...",
            request.primary(),
            request.images().len(),
            request.tags().len()
        );
    }

    let descriptor = create_and_push(exec, &request).await?;
    output::print_descriptor(&descriptor, args.quiet)?;
    Ok(())
}
