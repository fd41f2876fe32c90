//! CLI command definitions and dispatch.

mod create;
mod create_and_push;
mod exists;
mod push;
mod rm;
mod version;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cmanifest_core::config::ManifestConfig;
use cmanifest_core::reference::{ImageSource, TaggedRef};
use cmanifest_runtime::ToolExecutor;

/// cmanifest — build and publish multi-arch manifest lists.
#[derive(Parser)]
#[command(name = "cmanifest", version, about)]
pub struct Cli {
    /// Config file (default: ~/.cmanifest/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Container tool binary (overrides config and CMANIFEST_TOOL)
    #[arg(long, global = true)]
    pub tool: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a manifest list, push it under every tag, then clean up
    CreateAndPush(create_and_push::CreateAndPushArgs),
    /// Create a local manifest list and print its descriptor
    Create(create::CreateArgs),
    /// Push an existing local manifest list under one or more tags
    Push(push::PushArgs),
    /// Check whether a local image or manifest list exists
    Exists(exists::ExistsArgs),
    /// Remove a local image or manifest list
    Rm(rm::RmArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// `--repo` / `--tag` pair shared by single-reference commands.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Registry repository (e.g., "quay.io/org/os")
    #[arg(long)]
    pub repo: String,

    /// Tag
    #[arg(long)]
    pub tag: String,
}

impl TargetArgs {
    pub fn tagged_ref(&self) -> cmanifest_core::Result<TaggedRef> {
        TaggedRef::new(self.repo.as_str(), self.tag.as_str())
    }
}

/// Parse `--image` values, requiring a transport on each.
pub(crate) fn parse_images(images: &[String]) -> cmanifest_core::Result<Vec<ImageSource>> {
    images.iter().map(|i| ImageSource::parse(i)).collect()
}

/// Effective configuration: file, then environment, then `--tool`.
pub fn resolve_config(cli: &Cli) -> cmanifest_core::Result<ManifestConfig> {
    let mut config = ManifestConfig::load(cli.config.as_deref())?;
    if let Some(ref tool) = cli.tool {
        config.apply_tool_override(tool);
    }
    Ok(config)
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli, config: ManifestConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(
        tool = %config.tool.binary,
        global_args = ?config.tool.global_args,
        "Resolved container tool"
    );
    let exec = ToolExecutor::new(config.tool);
    match cli.command {
        Command::CreateAndPush(args) => create_and_push::execute(args, &exec).await,
        Command::Create(args) => create::execute(args, &exec).await,
        Command::Push(args) => push::execute(args, &exec).await,
        Command::Exists(args) => exists::execute(args, &exec).await,
        Command::Rm(args) => rm::execute(args, &exec).await,
        Command::Version(args) => version::execute(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_and_push() {
        let cli = Cli::try_parse_from([
            "cmanifest",
            "create-and-push",
            "--repo",
            "quay.io/org/os",
            "--tag",
            "v1",
            "--tag",
            "latest",
            "--image",
            "docker://quay.io/org/os-x86_64@sha256:aa",
            "--image",
            "docker://quay.io/org/os-aarch64@sha256:bb",
            "--v2s2",
            "--digest-file",
            "/tmp/digest",
        ])
        .unwrap();

        match cli.command {
            Command::CreateAndPush(args) => {
                assert_eq!(args.repo, "quay.io/org/os");
                assert_eq!(args.tags, vec!["v1", "latest"]);
                assert_eq!(args.images.len(), 2);
                assert!(args.v2s2);
                assert_eq!(args.digest_file, Some(PathBuf::from("/tmp/digest")));
            }
            _ => panic!("expected create-and-push"),
        }
    }

    #[test]
    fn test_create_and_push_requires_tag() {
        let result = Cli::try_parse_from([
            "cmanifest",
            "create-and-push",
            "--repo",
            "quay.io/org/os",
            "--image",
            "docker://a/x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_and_push_allows_no_images() {
        let cli = Cli::try_parse_from([
            "cmanifest",
            "create-and-push",
            "--repo",
            "quay.io/org/os",
            "--tag",
            "v1",
        ])
        .unwrap();
        match cli.command {
            Command::CreateAndPush(args) => assert!(args.images.is_empty()),
            _ => panic!("expected create-and-push"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cmanifest",
            "exists",
            "--repo",
            "quay.io/org/os",
            "--tag",
            "v1",
            "--tool",
            "/usr/bin/podman",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.tool.as_deref(), Some("/usr/bin/podman"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_resolve_config_tool_flag_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"tool:\n  binary: buildah\n").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "cmanifest",
            "--config",
            path.as_str(),
            "--tool",
            "podman-remote",
            "version",
        ])
        .unwrap();
        assert_eq!(resolve_config(&cli).unwrap().tool.binary, "podman-remote");
    }

    #[test]
    fn test_parse_images_requires_transport() {
        assert!(parse_images(&["docker://a/x".to_string()]).is_ok());
        assert!(parse_images(&["a/x".to_string()]).is_err());
    }

    #[test]
    fn test_target_args_validation() {
        let target = TargetArgs {
            repo: "quay.io/org/os".to_string(),
            tag: "v1".to_string(),
        };
        assert_eq!(target.tagged_ref().unwrap().full_reference(), "quay.io/org/os:v1");
    }
}
