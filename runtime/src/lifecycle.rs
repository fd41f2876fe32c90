//! Manifest lifecycle state machine.
//!
//! ```text
//!            start()
//!   ┌──────────┴──────────┐
//!   ▼                     ▼
//! Stale ──remove──▶ Clean ──build──▶ Built ──push──▶ Published ──remove──▶ Done
//! ```
//!
//! A failed step returns its error and leaves local state as it was. Nothing
//! is rolled back: the next run's `start()` finds the leftover reference as
//! `Stale` and removes it before building again.

use cmanifest_core::error::{ManifestError, Result};
use cmanifest_core::reference::{dedup_tags, ImageSource, TaggedRef};

use crate::executor::CommandExecutor;
use crate::manifest::{build, cleanup, probe, publish, ManifestDescriptor, PushOptions};

/// What to build and where to push it.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Local manifest list key; its tag is the primary tag.
    primary: TaggedRef,
    /// Every tag to push, primary first, without repeats.
    tags: Vec<String>,
    /// Per-architecture images, added in order.
    images: Vec<ImageSource>,
    /// Push options.
    push: PushOptions,
}

impl PublishRequest {
    pub fn new(
        repository: impl Into<String>,
        tags: Vec<String>,
        images: Vec<ImageSource>,
    ) -> Result<Self> {
        let tags = dedup_tags(tags);
        let primary_tag = tags.first().ok_or(ManifestError::NoTags)?;
        let primary = TaggedRef::new(repository, primary_tag.as_str())?;
        for tag in &tags[1..] {
            primary.with_tag(tag.as_str())?;
        }

        Ok(Self {
            primary,
            tags,
            images,
            push: PushOptions::default(),
        })
    }

    pub fn with_push_options(mut self, push: PushOptions) -> Self {
        self.push = push;
        self
    }

    pub fn primary(&self) -> &TaggedRef {
        &self.primary
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn images(&self) -> &[ImageSource] {
        &self.images
    }

    pub fn push_options(&self) -> &PushOptions {
        &self.push
    }
}

/// Lifecycle states for the primary reference in local storage.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    /// Nothing stored under the primary reference
    Clean,

    /// Leftover image or manifest list from an earlier run
    Stale,

    /// Manifest list created locally; descriptor captured
    Built(ManifestDescriptor),

    /// Pushed to every tag; local list still present
    Published(ManifestDescriptor),

    /// Local list removed
    Done(ManifestDescriptor),
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Clean => "clean",
            LifecycleState::Stale => "stale",
            LifecycleState::Built(_) => "built",
            LifecycleState::Published(_) => "published",
            LifecycleState::Done(_) => "done",
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Drives one `PublishRequest` through the lifecycle.
///
/// Assumes it is the only writer to the primary reference.
pub struct ManifestLifecycle<'a> {
    exec: &'a dyn CommandExecutor,
    request: &'a PublishRequest,
}

impl<'a> ManifestLifecycle<'a> {
    pub fn new(exec: &'a dyn CommandExecutor, request: &'a PublishRequest) -> Self {
        Self { exec, request }
    }

    /// Entry guard: probe the primary reference.
    pub async fn start(&self) -> Result<LifecycleState> {
        let state = if probe::exists(self.exec, &self.request.primary).await? {
            LifecycleState::Stale
        } else {
            LifecycleState::Clean
        };
        tracing::debug!(reference = %self.request.primary, state = %state, "Entry guard");
        Ok(state)
    }

    /// Advance one transition. `Done` is terminal and returned unchanged.
    pub async fn step(&self, state: LifecycleState) -> Result<LifecycleState> {
        let primary = &self.request.primary;
        let from = state.name();
        let next = match state {
            LifecycleState::Stale => {
                tracing::warn!(
                    reference = %primary,
                    "Removing local reference left over from a previous run"
                );
                cleanup::remove(self.exec, primary).await?;
                LifecycleState::Clean
            }
            LifecycleState::Clean => {
                let descriptor = build::create(self.exec, primary, &self.request.images).await?;
                LifecycleState::Built(descriptor)
            }
            LifecycleState::Built(descriptor) => {
                publish::push(
                    self.exec,
                    &primary.repository,
                    &self.request.tags,
                    &self.request.push,
                )
                .await?;
                LifecycleState::Published(descriptor)
            }
            LifecycleState::Published(descriptor) => {
                cleanup::remove(self.exec, primary).await?;
                LifecycleState::Done(descriptor)
            }
            done @ LifecycleState::Done(_) => return Ok(done),
        };
        tracing::info!(reference = %primary, from, to = next.name(), "Lifecycle transition");
        Ok(next)
    }

    /// Run to `Done` and return the descriptor captured at build time.
    pub async fn run(&self) -> Result<ManifestDescriptor> {
        let mut state = self.start().await?;
        loop {
            state = match state {
                LifecycleState::Done(descriptor) => return Ok(descriptor),
                other => self.step(other).await?,
            };
        }
    }
}

/// Build, push under every tag, clean up, and return the manifest descriptor.
pub async fn create_and_push(
    exec: &dyn CommandExecutor,
    request: &PublishRequest,
) -> Result<ManifestDescriptor> {
    ManifestLifecycle::new(exec, request).run().await
}
