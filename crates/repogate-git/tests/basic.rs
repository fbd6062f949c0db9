//! End-to-end checks against a real bare origin. Requires `git` on PATH.

use git2::{Oid, Repository, Signature};
use repogate_core::{RepoGateError, WriteMode};
use repogate_git::{Checkout, CheckoutConfig, GitCli, GitRepository};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

fn seed_origin(path: &Path) -> PathBuf {
    let repo = Repository::init_bare(path).unwrap();
    let sig = Signature::now("Seeder", "seeder@example.com").unwrap();
    let blob = repo.blob(b"# Demo\n").unwrap();
    let mut tb = repo.treebuilder(None).unwrap();
    tb.insert("README.md", blob, 0o100644).unwrap();
    let tree = repo.find_tree(tb.write().unwrap()).unwrap();
    repo.commit(Some("refs/heads/main"), &sig, &sig, "init", &tree, &[])
        .unwrap();
    repo.set_head("refs/heads/main").unwrap();
    path.to_path_buf()
}

fn commit_to_origin(origin: &Path, file: &str, content: &str, message: &str) -> Oid {
    let repo = Repository::open_bare(origin).unwrap();
    let parent = repo
        .find_reference("refs/heads/main")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    let blob = repo.blob(content.as_bytes()).unwrap();
    let mut tb = repo.treebuilder(Some(&parent.tree().unwrap())).unwrap();
    tb.insert(file, blob, 0o100644).unwrap();
    let tree = repo.find_tree(tb.write().unwrap()).unwrap();
    let sig = Signature::now("Upstream", "upstream@example.com").unwrap();
    repo.commit(Some("refs/heads/main"), &sig, &sig, message, &tree, &[&parent])
        .unwrap()
}

fn origin_file(origin: &Path, path: &str) -> Option<String> {
    let repo = Repository::open_bare(origin).unwrap();
    let commit = repo
        .find_reference("refs/heads/main")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    let entry = commit.tree().unwrap().get_path(Path::new(path)).ok()?;
    let blob = entry.to_object(&repo).unwrap().peel_to_blob().unwrap();
    Some(String::from_utf8(blob.content().to_vec()).unwrap())
}

struct HeadInfo {
    id: Oid,
    message: String,
    author: String,
    parent: Option<Oid>,
}

fn origin_head(origin: &Path) -> HeadInfo {
    let repo = Repository::open_bare(origin).unwrap();
    let commit = repo
        .find_reference("refs/heads/main")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    let author = commit.author().name().unwrap_or("").to_string();
    HeadInfo {
        id: commit.id(),
        message: commit.message().unwrap_or("").to_string(),
        author,
        parent: commit.parent_id(0).ok(),
    }
}

fn checkout_for(origin: &Path, local: PathBuf) -> Checkout {
    let config = CheckoutConfig {
        local_path: local,
        remote_url: origin.to_string_lossy().into_owned(),
        remote_name: "origin".into(),
        branch: "main".into(),
        author_name: "Tester".into(),
        author_email: "tester@example.com".into(),
        message_template: "Auto-update {path}".into(),
    };
    Checkout::new(config, Arc::new(GitCli::new()))
}

#[tokio::test]
async fn clone_then_pull_picks_up_upstream_commits() {
    let dir = tempdir().unwrap();
    let origin = seed_origin(&dir.path().join("origin.git"));
    let checkout = checkout_for(&origin, dir.path().join("work/checkout"));

    checkout.ensure_up_to_date().await.unwrap();
    assert!(checkout.root().join("README.md").is_file());
    let repo = GitRepository::open(checkout.root()).unwrap();
    assert_eq!(repo.current_branch().unwrap().as_deref(), Some("main"));

    commit_to_origin(&origin, "CHANGELOG.md", "v2\n", "upstream change");
    checkout.ensure_up_to_date().await.unwrap();
    assert_eq!(
        std::fs::read_to_string(checkout.root().join("CHANGELOG.md")).unwrap(),
        "v2\n"
    );
}

#[tokio::test]
async fn create_is_committed_and_pushed_to_origin() {
    let dir = tempdir().unwrap();
    let origin = seed_origin(&dir.path().join("origin.git"));
    let checkout = checkout_for(&origin, dir.path().join("checkout"));

    let report = checkout
        .write_file("a/b.txt", "hello", WriteMode::Create)
        .await
        .unwrap();

    assert!(report.committed);
    let head = origin_head(&origin);
    assert_eq!(head.message.trim_end(), "Auto-update a/b.txt");
    assert_eq!(head.author, "Tester");
    assert_eq!(report.commit, Some(head.id.to_string()));
    assert_eq!(origin_file(&origin, "a/b.txt").as_deref(), Some("hello"));
}

#[tokio::test]
async fn write_lands_on_top_of_upstream_history() {
    let dir = tempdir().unwrap();
    let origin = seed_origin(&dir.path().join("origin.git"));
    let checkout = checkout_for(&origin, dir.path().join("checkout"));
    checkout.ensure_up_to_date().await.unwrap();

    let upstream = commit_to_origin(&origin, "other.txt", "theirs", "upstream change");
    checkout
        .write_file("README.md", "# Rewritten\n", WriteMode::Update)
        .await
        .unwrap();

    let head = origin_head(&origin);
    assert_eq!(head.parent, Some(upstream));
    assert_eq!(origin_file(&origin, "other.txt").as_deref(), Some("theirs"));
    assert_eq!(
        origin_file(&origin, "README.md").as_deref(),
        Some("# Rewritten\n")
    );
}

#[tokio::test]
async fn identical_update_makes_no_commit() {
    let dir = tempdir().unwrap();
    let origin = seed_origin(&dir.path().join("origin.git"));
    let checkout = checkout_for(&origin, dir.path().join("checkout"));

    let first = checkout
        .write_file("README.md", "# Same\n", WriteMode::Update)
        .await
        .unwrap();
    let second = checkout
        .write_file("README.md", "# Same\n", WriteMode::Update)
        .await
        .unwrap();

    assert!(first.committed);
    assert!(!second.committed);
    assert_eq!(first.commit, second.commit);
    assert_eq!(
        std::fs::read_to_string(checkout.root().join("README.md")).unwrap(),
        "# Same\n"
    );
}

#[tokio::test]
async fn unreachable_remote_is_a_sync_error() {
    let dir = tempdir().unwrap();
    let checkout = checkout_for(&dir.path().join("no-such-origin.git"), dir.path().join("c"));

    let err = checkout.ensure_up_to_date().await.unwrap_err();
    assert!(matches!(err, RepoGateError::Sync(_)), "{err:?}");
    assert!(!GitRepository::is_checkout(checkout.root()));
}
