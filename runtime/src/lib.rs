//! cmanifest runtime - multi-arch manifest list lifecycle.
//!
//! Sequences `podman manifest` create/add/inspect/push and `podman image`
//! exists/rm invocations through a [`CommandExecutor`], reconciling
//! leftover local state from earlier failed runs.

pub mod executor;
pub mod lifecycle;
pub mod manifest;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export common types
pub use executor::{CommandExecutor, ToolExecutor};
pub use lifecycle::{create_and_push, LifecycleState, ManifestLifecycle, PublishRequest};
pub use manifest::{ManifestDescriptor, PushOptions};
