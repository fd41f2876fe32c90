//! `cmanifest create` command — create a local manifest list.

use clap::Args;
use cmanifest_runtime::manifest::build;
use cmanifest_runtime::CommandExecutor;

use super::TargetArgs;
use crate::output;

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Per-architecture images including transport
    #[arg(long = "image")]
    pub images: Vec<String>,
}

pub async fn execute(
    args: CreateArgs,
    exec: &dyn CommandExecutor,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = args.target.tagged_ref()?;
    let images = super::parse_images(&args.images)?;

    let descriptor = build::create(exec, &target, &images).await?;
    output::print_descriptor(&descriptor, false)?;
    Ok(())
}
