//! `cmanifest rm` command — remove a local image or manifest list.

use clap::Args;
use cmanifest_runtime::manifest::cleanup;
use cmanifest_runtime::CommandExecutor;

use super::TargetArgs;

#[derive(Args)]
pub struct RmArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn execute(
    args: RmArgs,
    exec: &dyn CommandExecutor,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = args.target.tagged_ref()?;
    cleanup::remove(exec, &target).await?;
    println!("Removed: {target}");
    Ok(())
}
