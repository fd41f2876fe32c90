//! cmanifest core - foundational types for multi-arch manifest publishing.
//!
//! Value types, error taxonomy, exec outcomes and configuration shared by
//! the runtime engine and the CLI.

pub mod config;
pub mod error;
pub mod exec;
pub mod reference;

// Re-export commonly used types
pub use config::{LogLevel, ManifestConfig, ToolConfig};
pub use error::{ManifestError, Result};
pub use exec::{CommandOutcome, ExecOptions};
pub use reference::{dedup_tags, ImageSource, TaggedRef};

/// cmanifest version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
