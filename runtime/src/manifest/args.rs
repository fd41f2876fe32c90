//! Argument vectors for the container tool.
//!
//! Shapes match `podman manifest`/`podman image` exactly; the binary name
//! and any global flags are added by the executor.

use std::path::Path;

use cmanifest_core::reference::{ImageSource, TaggedRef};

/// Media type forced by `--v2s2`.
pub const V2S2_FORMAT: &str = "v2s2";

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// `manifest create <repo>:<tag>`
pub fn create(target: &TaggedRef) -> Vec<String> {
    args(["manifest", "create", &target.full_reference()])
}

/// `manifest add <repo>:<tag> <image-ref-with-transport>`
pub fn add(target: &TaggedRef, image: &ImageSource) -> Vec<String> {
    args(["manifest", "add", &target.full_reference(), image.as_str()])
}

/// `manifest inspect <repo>:<tag>`
pub fn inspect(target: &TaggedRef) -> Vec<String> {
    args(["manifest", "inspect", &target.full_reference()])
}

/// `image exists <repo>:<tag>`
pub fn image_exists(target: &TaggedRef) -> Vec<String> {
    args(["image", "exists", &target.full_reference()])
}

/// `manifest exists <repo>:<tag>`
pub fn manifest_exists(target: &TaggedRef) -> Vec<String> {
    args(["manifest", "exists", &target.full_reference()])
}

/// `image rm <repo>:<tag>`; removes a manifest list or a plain image.
pub fn remove(target: &TaggedRef) -> Vec<String> {
    args(["image", "rm", &target.full_reference()])
}

/// Push arguments shared by every tag: everything but the destination.
///
/// `manifest push --all <repo>:<tag0> [--remove-signatures -f v2s2] [--digestfile <path>]`
pub fn push_base(source: &TaggedRef, v2s2: bool, digest_file: Option<&Path>) -> Vec<String> {
    let mut cmd = args(["manifest", "push", "--all", &source.full_reference()]);
    if v2s2 {
        // Registries such as Quay reject lists mixing OCI and Docker media types.
        cmd.extend(args(["--remove-signatures", "-f", V2S2_FORMAT]));
    }
    if let Some(path) = digest_file {
        cmd.push("--digestfile".to_string());
        cmd.push(path.display().to_string());
    }
    cmd
}

/// Full push vector for one destination tag.
pub fn push(base: &[String], destination: &TaggedRef) -> Vec<String> {
    let mut cmd = base.to_vec();
    cmd.push(destination.full_reference());
    cmd
}
