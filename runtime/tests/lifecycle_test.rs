//! Lifecycle tests against the in-memory container tool.
//!
//! Covers the end-to-end publish path, retry after a failed run, and the
//! push argument shapes seen by the tool.

use cmanifest_core::error::ManifestError;
use cmanifest_core::reference::{ImageSource, TaggedRef};
use cmanifest_runtime::manifest::{cleanup, probe};
use cmanifest_runtime::testing::{fake_digest, FakeTool};
use cmanifest_runtime::{create_and_push, PublishRequest, PushOptions};

const REPO: &str = "example.com/r";

fn request(tags: &[&str], images: &[&str]) -> PublishRequest {
    PublishRequest::new(
        REPO,
        tags.iter().map(|t| t.to_string()).collect(),
        images.iter().map(|i| ImageSource::parse(i).unwrap()).collect(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_publish() {
    let tool = FakeTool::new();
    let req = request(&["v1", "latest"], &["docker://a/x", "docker://a/y"]);

    let descriptor = create_and_push(&tool, &req).await.unwrap();

    assert_eq!(descriptor.members().len(), 2);
    assert_eq!(
        descriptor.media_type(),
        Some("application/vnd.oci.image.index.v1+json")
    );
    let expected = vec!["docker://a/x".to_string(), "docker://a/y".to_string()];
    assert_eq!(tool.pushed("example.com/r:v1"), Some(expected.clone()));
    assert_eq!(tool.pushed("example.com/r:latest"), Some(expected));
    assert!(!tool.has_local("example.com/r:v1"));
    assert!(!tool.has_local("example.com/r:latest"));
}

#[tokio::test]
async fn test_run_twice_same_inputs() {
    let tool = FakeTool::new();
    let req = request(&["v1"], &["docker://a/x", "docker://a/y"]);

    let first = create_and_push(&tool, &req).await.unwrap();
    let second = create_and_push(&tool, &req).await.unwrap();

    assert_eq!(first, second);
    assert!(!tool.has_local("example.com/r:v1"));
}

#[tokio::test]
async fn test_retry_after_failed_add() {
    let tool = FakeTool::new();
    let req = request(&["v1"], &["docker://a/x", "docker://a/y"]);
    tool.fail_once(&["manifest", "add", "example.com/r:v1", "docker://a/y"]);

    let err = create_and_push(&tool, &req).await.unwrap_err();
    assert!(matches!(err, ManifestError::Execution { .. }));
    assert!(tool.has_local("example.com/r:v1"));
    assert!(tool.pushed("example.com/r:v1").is_none());
    assert!(!tool.commands().iter().any(|c| c.starts_with("manifest push")));

    let first_run = tool.calls().len();
    let descriptor = create_and_push(&tool, &req).await.unwrap();
    assert_eq!(descriptor.members().len(), 2);

    let retry: Vec<String> = tool.commands()[first_run..].to_vec();
    assert_eq!(retry[0], "image exists example.com/r:v1");
    assert_eq!(retry[1], "manifest exists example.com/r:v1");
    assert_eq!(retry[2], "image rm example.com/r:v1");
    assert_eq!(retry[3], "manifest create example.com/r:v1");
    assert!(!tool.has_local("example.com/r:v1"));
}

#[tokio::test]
async fn test_retry_after_failed_push() {
    let tool = FakeTool::new();
    let req = request(&["v1"], &["docker://a/x"]);
    tool.fail_once(&[
        "manifest",
        "push",
        "--all",
        "example.com/r:v1",
        "example.com/r:v1",
    ]);

    assert!(create_and_push(&tool, &req).await.is_err());
    assert!(tool.has_local("example.com/r:v1"));

    create_and_push(&tool, &req).await.unwrap();
    assert_eq!(
        tool.pushed("example.com/r:v1"),
        Some(vec!["docker://a/x".to_string()])
    );
    assert!(!tool.has_local("example.com/r:v1"));
}

#[tokio::test]
async fn test_stale_plain_image_is_replaced() {
    let tool = FakeTool::new();
    tool.seed_image("example.com/r:v1");
    let req = request(&["v1"], &["docker://a/x"]);

    create_and_push(&tool, &req).await.unwrap();
    assert!(tool.pushed("example.com/r:v1").is_some());
    assert!(!tool.has_local("example.com/r:v1"));
}

#[tokio::test]
async fn test_three_tags_push_primary_content() {
    let tool = FakeTool::new();
    let req = request(&["a", "b", "c"], &["docker://a/x"]);

    create_and_push(&tool, &req).await.unwrap();

    let pushes: Vec<Vec<String>> = tool
        .calls()
        .into_iter()
        .filter(|c| c.get(1).map(String::as_str) == Some("push"))
        .collect();
    assert_eq!(pushes.len(), 3);
    for (push, tag) in pushes.iter().zip(["a", "b", "c"]) {
        assert_eq!(push[3], "example.com/r:a");
        assert_eq!(push.last().unwrap(), &format!("example.com/r:{tag}"));
    }
}

#[tokio::test]
async fn test_digest_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let digest_path = dir.path().join("manifest.digest");
    let tool = FakeTool::new();
    let req = request(&["v1", "latest"], &["docker://a/x", "docker://a/y"]).with_push_options(
        PushOptions {
            v2s2: true,
            digest_file: Some(digest_path.clone()),
        },
    );

    create_and_push(&tool, &req).await.unwrap();

    let digest = std::fs::read_to_string(&digest_path).unwrap();
    assert_eq!(
        digest,
        fake_digest(&["docker://a/x".to_string(), "docker://a/y".to_string()])
    );
    for push in tool.commands().iter().filter(|c| c.starts_with("manifest push")) {
        assert!(push.contains("--remove-signatures -f v2s2"));
        assert!(push.contains(&format!("--digestfile {}", digest_path.display())));
    }
}

#[tokio::test]
async fn test_cleanup_follows_existence() {
    let tool = FakeTool::new();
    let target = TaggedRef::new(REPO, "v1").unwrap();

    assert!(!probe::exists(&tool, &target).await.unwrap());
    assert!(cleanup::remove(&tool, &target).await.is_err());

    tool.seed_manifest("example.com/r:v1", &["docker://a/x"]);
    assert!(probe::exists(&tool, &target).await.unwrap());
    cleanup::remove(&tool, &target).await.unwrap();
    assert!(!probe::exists(&tool, &target).await.unwrap());
}
