//! Test executors.
//!
//! - [`ScriptedExecutor`] replays canned outcomes per argument vector and
//!   records every call.
//! - [`FakeTool`] keeps an in-memory local store and registry and answers
//!   the subset of `podman manifest`/`podman image` the lifecycle uses.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use cmanifest_core::error::Result;
use cmanifest_core::exec::{CommandOutcome, ExecOptions, EXIT_ABSENT, EXIT_TOOL_ERROR};

use crate::executor::{check_outcome, CommandExecutor};

const FAKE_PROGRAM: &str = "podman";

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn tool_error(message: &str) -> CommandOutcome {
    CommandOutcome {
        exit_code: EXIT_TOOL_ERROR,
        stdout: Vec::new(),
        stderr: format!("Error: {message}\n").into_bytes(),
    }
}

/// Executor answering from a script.
///
/// Unscripted invocations succeed with empty output. A scripted argument
/// vector answers its queued outcomes in order; the last one repeats.
#[derive(Default)]
pub struct ScriptedExecutor {
    script: Mutex<HashMap<Vec<String>, VecDeque<CommandOutcome>>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for an exact argument vector.
    pub fn respond(&self, args: &[&str], outcome: CommandOutcome) -> &Self {
        self.script
            .lock()
            .entry(to_args(args))
            .or_default()
            .push_back(outcome);
        self
    }

    /// Every argument vector executed so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    /// Calls rendered as space-joined strings.
    pub fn commands(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.join(" ")).collect()
    }

    fn next_outcome(&self, args: &[String]) -> CommandOutcome {
        let mut script = self.script.lock();
        match script.get_mut(args) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => CommandOutcome::default(),
        }
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, args: &[String], opts: ExecOptions) -> Result<CommandOutcome> {
        self.calls.lock().push(args.to_vec());
        let outcome = self.next_outcome(args);
        check_outcome(FAKE_PROGRAM, args, opts, outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LocalObject {
    Image,
    ManifestList(Vec<String>),
}

#[derive(Default)]
struct FakeState {
    local: HashMap<String, LocalObject>,
    registry: HashMap<String, Vec<String>>,
    failures: Vec<Vec<String>>,
    calls: Vec<Vec<String>>,
}

/// In-memory stand-in for the container tool.
#[derive(Default)]
pub struct FakeTool {
    state: Mutex<FakeState>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave a manifest list behind, as a crashed run would.
    pub fn seed_manifest(&self, reference: &str, members: &[&str]) {
        self.state.lock().local.insert(
            reference.to_string(),
            LocalObject::ManifestList(to_args(members)),
        );
    }

    /// Place a plain image in local storage.
    pub fn seed_image(&self, reference: &str) {
        self.state
            .lock()
            .local
            .insert(reference.to_string(), LocalObject::Image);
    }

    /// Fail the next invocation with exactly these arguments (exit 125).
    pub fn fail_once(&self, args: &[&str]) {
        self.state.lock().failures.push(to_args(args));
    }

    /// Whether anything is stored locally under `reference`.
    pub fn has_local(&self, reference: &str) -> bool {
        self.state.lock().local.contains_key(reference)
    }

    /// Members of a local manifest list.
    pub fn local_members(&self, reference: &str) -> Option<Vec<String>> {
        match self.state.lock().local.get(reference) {
            Some(LocalObject::ManifestList(members)) => Some(members.clone()),
            _ => None,
        }
    }

    /// Members pushed to the registry under `reference`.
    pub fn pushed(&self, reference: &str) -> Option<Vec<String>> {
        self.state.lock().registry.get(reference).cloned()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().calls.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.state.lock().calls.iter().map(|c| c.join(" ")).collect()
    }

    fn run(state: &mut FakeState, args: &[String]) -> CommandOutcome {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        match argv.as_slice() {
            ["image", "exists", r] => match state.local.get(*r) {
                Some(LocalObject::Image) => CommandOutcome::with_code(0),
                _ => CommandOutcome::with_code(EXIT_ABSENT),
            },
            ["manifest", "exists", r] => match state.local.get(*r) {
                Some(LocalObject::ManifestList(_)) => CommandOutcome::with_code(0),
                _ => CommandOutcome::with_code(EXIT_ABSENT),
            },
            ["manifest", "create", r] => {
                if state.local.contains_key(*r) {
                    return tool_error(&format!("image name \"{r}\" is already associated"));
                }
                state
                    .local
                    .insert(r.to_string(), LocalObject::ManifestList(Vec::new()));
                CommandOutcome::default()
            }
            ["manifest", "add", r, image] => match state.local.get_mut(*r) {
                Some(LocalObject::ManifestList(members)) => {
                    members.push(image.to_string());
                    CommandOutcome::default()
                }
                _ => tool_error(&format!("{r}: image is not a manifest list")),
            },
            ["manifest", "inspect", r] => match state.local.get(*r) {
                Some(LocalObject::ManifestList(members)) => {
                    CommandOutcome::with_stdout(render_index(members))
                }
                _ => tool_error(&format!("{r}: image is not a manifest list")),
            },
            ["manifest", "push", "--all", source, rest @ ..] => {
                Self::push(state, source, rest)
            }
            ["image", "rm", r] => match state.local.remove(*r) {
                Some(_) => CommandOutcome::with_stdout(format!("Untagged: {r}\n")),
                None => CommandOutcome {
                    exit_code: EXIT_ABSENT,
                    stdout: Vec::new(),
                    stderr: format!("Error: {r}: image not known\n").into_bytes(),
                },
            },
            _ => tool_error(&format!("unsupported invocation: {}", args.join(" "))),
        }
    }

    fn push(state: &mut FakeState, source: &str, rest: &[&str]) -> CommandOutcome {
        let Some((destination, flags)) = rest.split_last() else {
            return tool_error("missing push destination");
        };
        let members = match state.local.get(source) {
            Some(LocalObject::ManifestList(members)) => members.clone(),
            _ => return tool_error(&format!("{source}: image is not a manifest list")),
        };

        let digest = fake_digest(&members);
        let mut flags = flags.iter();
        while let Some(flag) = flags.next() {
            if *flag == "--digestfile" {
                let Some(path) = flags.next() else {
                    return tool_error("--digestfile requires a path");
                };
                if let Err(e) = std::fs::write(path, &digest) {
                    return tool_error(&format!("writing digest file: {e}"));
                }
            }
        }

        state.registry.insert(destination.to_string(), members);
        CommandOutcome::default()
    }
}

#[async_trait]
impl CommandExecutor for FakeTool {
    async fn execute(&self, args: &[String], opts: ExecOptions) -> Result<CommandOutcome> {
        let outcome = {
            let mut state = self.state.lock();
            state.calls.push(args.to_vec());
            if let Some(pos) = state.failures.iter().position(|f| f.as_slice() == args) {
                state.failures.remove(pos);
                tool_error("injected failure")
            } else {
                Self::run(&mut state, args)
            }
        };
        check_outcome(FAKE_PROGRAM, args, opts, outcome)
    }
}

/// Digest of the index `manifest inspect` renders for `members`.
pub fn fake_digest(members: &[String]) -> String {
    format!("sha256:{:x}", Sha256::digest(render_index(members).as_bytes()))
}

fn render_index(members: &[String]) -> String {
    let manifests: Vec<serde_json::Value> = members
        .iter()
        .enumerate()
        .map(|(i, source)| {
            serde_json::json!({
                "mediaType": "application/vnd.oci.image.manifest.v1+json",
                "digest": format!("sha256:{:064x}", i),
                "annotations": { "source": source },
            })
        })
        .collect();
    serde_json::json!({
        "schemaVersion": 2,
        "mediaType": "application/vnd.oci.image.index.v1+json",
        "manifests": manifests,
    })
    .to_string()
}
