//! Repository/tag and image-source value types.
//!
//! `TaggedRef` is the `repository:tag` key every local manifest operation is
//! addressed by. `ImageSource` is a transport-qualified per-architecture image
//! (e.g. `docker://quay.io/org/os@sha256:...`) added into a manifest list.

use crate::error::{ManifestError, Result};

/// Maximum tag length accepted by OCI distribution.
const MAX_TAG_LEN: usize = 128;

/// Transports understood by the container tool.
const KNOWN_TRANSPORTS: &[&str] = &[
    "docker://",
    "docker-archive:",
    "docker-daemon:",
    "oci:",
    "oci-archive:",
    "dir:",
    "containers-storage:",
];

/// A `repository:tag` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedRef {
    /// Registry repository (e.g., "quay.io/org/os"), kept opaque
    pub repository: String,
    /// Plain tag without transport (e.g., "v1", "latest")
    pub tag: String,
}

impl TaggedRef {
    /// Build a reference, validating both halves.
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Result<Self> {
        let repository = repository.into();
        let tag = tag.into();

        if repository.trim().is_empty() {
            return Err(ManifestError::InvalidReference(
                "Empty repository".to_string(),
            ));
        }
        validate_tag(&tag)?;

        Ok(Self { repository, tag })
    }

    /// The same repository under a different tag.
    pub fn with_tag(&self, tag: impl Into<String>) -> Result<Self> {
        Self::new(self.repository.clone(), tag)
    }

    /// The `repository:tag` string handed to the tool.
    pub fn full_reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

impl std::fmt::Display for TaggedRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_reference())
    }
}

fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(ManifestError::InvalidReference("Empty tag".to_string()));
    }
    if tag.contains(&['/', ':', '@'][..]) {
        return Err(ManifestError::InvalidReference(format!(
            "Tag '{}' must be a plain tag without transport, path or digest",
            tag
        )));
    }
    if tag.len() > MAX_TAG_LEN {
        return Err(ManifestError::InvalidReference(format!(
            "Tag '{}' exceeds {} characters",
            tag, MAX_TAG_LEN
        )));
    }
    Ok(())
}

/// A transport-qualified image reference to add into a manifest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource(String);

impl ImageSource {
    /// Parse an image source, requiring a known transport prefix.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        let transport = KNOWN_TRANSPORTS
            .iter()
            .find(|t| source.starts_with(**t))
            .ok_or_else(|| {
                ManifestError::InvalidReference(format!(
                    "Image '{}' is missing a transport prefix (e.g. docker://)",
                    source
                ))
            })?;

        if source.len() == transport.len() {
            return Err(ManifestError::InvalidReference(format!(
                "Image '{}' has a transport but no reference",
                source
            )));
        }

        Ok(Self(source.to_string()))
    }

    /// Transport prefix, including its separator.
    pub fn transport(&self) -> &str {
        KNOWN_TRANSPORTS
            .iter()
            .find(|t| self.0.starts_with(**t))
            .copied()
            .unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drop repeated tags, keeping first occurrences in order.
pub fn dedup_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(Into::into)
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
