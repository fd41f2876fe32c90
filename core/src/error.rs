use thiserror::Error;

/// Manifest lifecycle error types
#[derive(Error, Debug)]
pub enum ManifestError {
    /// A checked tool invocation exited non-zero
    #[error("Command failed: `{command}` exited with {exit_code}{}", detail("", .stderr))]
    Execution {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The tool binary could not be launched
    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// Existence probe returned something other than exists/absent
    #[error(
        "Error encountered when checking if {reference} exists (exit {exit_code}){}{}",
        detail("stdout", .stdout),
        detail("stderr", .stderr)
    )]
    ProbeAmbiguous {
        reference: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// `manifest inspect` output is not valid JSON
    #[error("Malformed manifest descriptor: {0}")]
    MalformedDescriptor(String),

    /// Repository, tag or image source failed validation
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Push or lifecycle invoked without any tag
    #[error("At least one tag is required")]
    NoTags,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// `: text` (or `; label: text`) suffix for captured tool output, empty when
/// there is nothing to show.
fn detail(label: &str, text: &str) -> String {
    let text = text.trim();
    match (text.is_empty(), label.is_empty()) {
        (true, _) => String::new(),
        (false, true) => format!(": {text}"),
        (false, false) => format!("; {label}: {text}"),
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        ManifestError::MalformedDescriptor(err.to_string())
    }
}

impl From<serde_yaml::Error> for ManifestError {
    fn from(err: serde_yaml::Error) -> Self {
        ManifestError::ConfigError(err.to_string())
    }
}

/// Result type alias for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_display() {
        let error = ManifestError::Execution {
            command: "podman manifest create quay.io/org/os:v1".to_string(),
            exit_code: 125,
            stderr: "image already exists".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Command failed: `podman manifest create quay.io/org/os:v1` exited with 125: image already exists"
        );
    }

    #[test]
    fn test_execution_error_without_stderr() {
        let error = ManifestError::Execution {
            command: "podman image rm quay.io/org/os:v1".to_string(),
            exit_code: 125,
            stderr: String::new(),
        };
        assert_eq!(
            error.to_string(),
            "Command failed: `podman image rm quay.io/org/os:v1` exited with 125"
        );
    }

    #[test]
    fn test_probe_ambiguous_display_includes_output() {
        let error = ManifestError::ProbeAmbiguous {
            reference: "quay.io/org/os:v1".to_string(),
            exit_code: 125,
            stdout: "partial listing\n".to_string(),
            stderr: "Error: database is locked\n".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error encountered when checking if quay.io/org/os:v1 exists (exit 125); \
             stdout: partial listing; stderr: Error: database is locked"
        );
    }

    #[test]
    fn test_probe_ambiguous_display_skips_empty_stdout() {
        let error = ManifestError::ProbeAmbiguous {
            reference: "quay.io/org/os:v1".to_string(),
            exit_code: 125,
            stdout: "  \n".to_string(),
            stderr: "storage is locked".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error encountered when checking if quay.io/org/os:v1 exists (exit 125); \
             stderr: storage is locked"
        );
    }

    #[test]
    fn test_spawn_error_display() {
        let error = ManifestError::Spawn {
            program: "podman".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to run podman: No such file or directory"
        );
    }

    #[test]
    fn test_no_tags_display() {
        assert_eq!(
            ManifestError::NoTags.to_string(),
            "At least one tag is required"
        );
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err: ManifestError = result.unwrap_err().into();
        assert!(matches!(err, ManifestError::MalformedDescriptor(_)));
    }

    #[test]
    fn test_serde_yaml_error_conversion() {
        let result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content:");
        let err: ManifestError = result.unwrap_err().into();
        assert!(matches!(err, ManifestError::ConfigError(_)));
    }
}
