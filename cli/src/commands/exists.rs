//! `cmanifest exists` command — check for a local image or manifest list.

use clap::Args;
use cmanifest_runtime::manifest::probe;
use cmanifest_runtime::CommandExecutor;

use super::TargetArgs;

#[derive(Args)]
pub struct ExistsArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn execute(
    args: ExistsArgs,
    exec: &dyn CommandExecutor,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = args.target.tagged_ref()?;
    let exists = probe::exists(exec, &target).await?;
    println!("{exists}");
    Ok(())
}
