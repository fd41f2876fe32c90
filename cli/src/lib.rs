//! cmanifest CLI - multi-arch manifest list publishing.

pub mod commands;
pub mod logging;
pub mod output;
