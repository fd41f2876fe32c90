//! Manifest list operations over the container tool.
//!
//! Each operation is a short sequence of tool invocations against one
//! `repository:tag` in local storage:
//!
//! ```text
//! probe::exists    image exists / manifest exists   (read-only)
//! build::create    manifest create, add..., inspect
//! publish::push    manifest push --all, once per tag
//! cleanup::remove  image rm
//! ```

pub mod args;
pub mod build;
pub mod cleanup;
mod descriptor;
pub mod probe;
pub mod publish;

pub use descriptor::ManifestDescriptor;
pub use publish::PushOptions;
