//! Descriptor output helpers for CLI commands.

use cmanifest_runtime::ManifestDescriptor;

/// Render a descriptor: pretty JSON, or just the member count when quiet.
pub fn render_descriptor(
    descriptor: &ManifestDescriptor,
    quiet: bool,
) -> serde_json::Result<String> {
    if quiet {
        Ok(descriptor.members().len().to_string())
    } else {
        serde_json::to_string_pretty(descriptor.as_value())
    }
}

pub fn print_descriptor(descriptor: &ManifestDescriptor, quiet: bool) -> serde_json::Result<()> {
    println!("{}", render_descriptor(descriptor, quiet)?);
    Ok(())
}
