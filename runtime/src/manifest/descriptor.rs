//! Manifest descriptor returned by `manifest inspect`.
//!
//! The parsed JSON is passed through untouched; accessors only read it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cmanifest_core::error::Result;

/// De-serialized manifest list document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestDescriptor(Value);

impl ManifestDescriptor {
    /// Parse inspect output.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        Ok(Self(serde_json::from_slice(raw)?))
    }

    /// Top-level `mediaType`, if present.
    pub fn media_type(&self) -> Option<&str> {
        self.0.get("mediaType").and_then(Value::as_str)
    }

    /// Entries of the `manifests` array (empty if absent).
    pub fn members(&self) -> &[Value] {
        self.0
            .get("manifests")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `os/arch[/variant]` for each member that declares a platform.
    pub fn platforms(&self) -> Vec<String> {
        self.members()
            .iter()
            .filter_map(|m| m.get("platform"))
            .filter_map(|p| {
                let os = p.get("os")?.as_str()?;
                let arch = p.get("architecture")?.as_str()?;
                Some(match p.get("variant").and_then(Value::as_str) {
                    Some(variant) => format!("{os}/{arch}/{variant}"),
                    None => format!("{os}/{arch}"),
                })
            })
            .collect()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ManifestDescriptor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmanifest_core::error::ManifestError;

    const LIST: &str = r#"{
        "schemaVersion": 2,
        "mediaType": "application/vnd.oci.image.index.v1+json",
        "manifests": [
            {"digest": "sha256:aa", "platform": {"os": "linux", "architecture": "amd64"}},
            {"digest": "sha256:bb", "platform": {"os": "linux", "architecture": "arm64", "variant": "v8"}},
            {"digest": "sha256:cc"}
        ]
    }"#;

    #[test]
    fn test_parse_and_accessors() {
        let d = ManifestDescriptor::parse(LIST.as_bytes()).unwrap();
        assert_eq!(d.media_type(), Some("application/vnd.oci.image.index.v1+json"));
        assert_eq!(d.members().len(), 3);
        assert_eq!(d.platforms(), vec!["linux/amd64", "linux/arm64/v8"]);
        assert_eq!(d.as_value()["schemaVersion"], 2);
    }

    #[test]
    fn test_missing_manifests_array() {
        let d = ManifestDescriptor::parse(br#"{"schemaVersion": 2}"#).unwrap();
        assert!(d.members().is_empty());
        assert!(d.platforms().is_empty());
        assert_eq!(d.media_type(), None);
    }

    #[test]
    fn test_malformed_output() {
        let err = ManifestDescriptor::parse(b"Error: no such manifest").unwrap_err();
        assert!(matches!(err, ManifestError::MalformedDescriptor(_)));
    }

    #[test]
    fn test_serializes_transparently() {
        let d = ManifestDescriptor::parse(br#"{"manifests":[]}"#).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), r#"{"manifests":[]}"#);
    }
}
