//! The local working copy and everything that mutates it.
//!
//! A [`Checkout`] owns one directory mirroring one remote branch. Clones,
//! pulls and write-then-publish sequences all take the exclusive side of an
//! internal [`RwLock`], so concurrent requests can never interleave their
//! filesystem and git operations. Read-only scans take the shared side after
//! the tree has been refreshed.

use crate::{errors::GitError, types::*, vcs::VersionControl};
use repogate_core::{
    FileEntry, PublishReport, PublishStep, RepoGateError, Result, WriteMode,
};
use std::{
    io,
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::RwLock};
use tracing::{info, warn};

pub struct Checkout {
    config: CheckoutConfig,
    vcs: Arc<dyn VersionControl>,
    lock: RwLock<()>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("config", &self.config)
            .finish()
    }
}

impl Checkout {
    pub fn new(config: CheckoutConfig, vcs: Arc<dyn VersionControl>) -> Self {
        Self {
            config,
            vcs,
            lock: RwLock::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.config.local_path
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Clone the remote if the checkout is missing or corrupt, otherwise pull.
    pub async fn ensure_up_to_date(&self) -> Result<()> {
        let _guard = self.lock.write().await;
        self.sync_locked(true).await
    }

    /// Clone the remote if the checkout is missing or corrupt; never pulls.
    pub async fn ensure_cloned(&self) -> Result<()> {
        let _guard = self.lock.write().await;
        self.sync_locked(false).await
    }

    /// Refresh the checkout, then run `scan` against its root on a blocking thread.
    ///
    /// Writers are held off until `scan` returns.
    pub async fn with_fresh_tree<T, F>(&self, scan: F) -> Result<T>
    where
        F: FnOnce(PathBuf) -> T + Send + 'static,
        T: Send + 'static,
    {
        self.ensure_up_to_date().await?;
        let _guard = self.lock.read().await;
        let root = self.config.local_path.clone();
        tokio::task::spawn_blocking(move || scan(root))
            .await
            .map_err(|e| RepoGateError::Task(e.to_string()))
    }

    /// Read a file as UTF-8 text without touching the remote.
    pub async fn read_file(&self, path: &str) -> Result<FileEntry> {
        let relative = validate_relative_path(path)?;
        let _guard = self.lock.read().await;
        let target = match confine(self.root(), &relative, path).await {
            Err(RepoGateError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepoGateError::NotFound("File not found".into()));
            }
            other => other?,
        };
        if !is_regular_file(&target).await {
            return Err(RepoGateError::NotFound("File not found".into()));
        }
        let bytes = fs::read(&target).await?;
        let content = String::from_utf8(bytes)
            .map_err(|_| RepoGateError::InvalidInput(format!("File is not UTF-8 text: {}", path)))?;
        Ok(FileEntry {
            path: path.to_string(),
            content,
        })
    }

    /// Write `content` to `path` and publish the change to the remote.
    ///
    /// A publish failure leaves the written file in the working tree.
    pub async fn write_file(
        &self,
        path: &str,
        content: &str,
        mode: WriteMode,
    ) -> Result<PublishReport> {
        let relative = validate_relative_path(path)?;
        let _guard = self.lock.write().await;
        self.sync_locked(true).await?;

        let target = confine(self.root(), &relative, path).await?;
        match mode {
            WriteMode::Update => {
                if !is_regular_file(&target).await {
                    return Err(RepoGateError::NotFound("File not found".into()));
                }
            }
            WriteMode::Create => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).await?;
                }
            }
        }
        fs::write(&target, content.as_bytes()).await?;
        info!(path, ?mode, bytes = content.len(), "file written");

        match self.publish_locked(path, mode).await {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!(path, "publish failed, local modification retained: {}", e);
                Err(e)
            }
        }
    }

    async fn sync_locked(&self, pull: bool) -> Result<()> {
        let root = self.root();
        if self.vcs.is_repository(root) {
            if pull {
                info!(branch = %self.config.branch, "pulling checkout");
                self.vcs
                    .pull(root, &self.config.remote_name, &self.config.branch)
                    .await
                    .map_err(sync_error)?;
            }
            return Ok(());
        }

        if fs::symlink_metadata(root).await.is_ok() {
            warn!(path = %root.display(), "checkout exists without repository metadata, removing");
            remove_path(root).await?;
        }
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        info!(path = %root.display(), branch = %self.config.branch, "cloning checkout");
        self.vcs
            .clone_repo(&self.config.remote_url, root, &self.config.branch)
            .await
            .map_err(sync_error)?;
        Ok(())
    }

    async fn publish_locked(&self, path: &str, mode: WriteMode) -> Result<PublishReport> {
        let root = self.root();
        let cfg = &self.config;

        self.vcs
            .configure_identity(root, &cfg.author_name, &cfg.author_email)
            .await
            .map_err(publish_error(PublishStep::ConfigureIdentity))?;
        self.vcs
            .set_remote(root, &cfg.remote_name, &cfg.remote_url)
            .await
            .map_err(publish_error(PublishStep::SetRemote))?;
        self.vcs
            .pull_rebase(root, &cfg.remote_name, &cfg.branch)
            .await
            .map_err(publish_error(PublishStep::RebasePull))?;
        self.vcs
            .add(root, path)
            .await
            .map_err(publish_error(PublishStep::Stage))?;
        let outcome = self
            .vcs
            .commit(root, &cfg.commit_message(path))
            .await
            .map_err(publish_error(PublishStep::Commit))?;
        self.vcs
            .push(root, &cfg.remote_name, &cfg.branch)
            .await
            .map_err(publish_error(PublishStep::Push))?;

        let commit = match self.vcs.head_commit(root) {
            Ok(commit) => commit,
            Err(e) => {
                warn!("could not resolve HEAD after publish: {}", e);
                None
            }
        };
        let committed = outcome == CommitOutcome::Committed;
        info!(path, committed, commit = ?commit, "published");
        Ok(PublishReport {
            path: path.to_string(),
            mode,
            committed,
            commit,
        })
    }
}

fn sync_error(e: GitError) -> RepoGateError {
    RepoGateError::Sync(e.to_string())
}

fn publish_error(step: PublishStep) -> impl FnOnce(GitError) -> RepoGateError {
    move |e| RepoGateError::Publish {
        step,
        message: e.to_string(),
    }
}

/// Check that `path` is relative, has no `..` and stays out of `.git`.
///
/// Symlinks are checked separately once the checkout exists on disk.
pub fn validate_relative_path(path: &str) -> Result<PathBuf> {
    if path.trim().is_empty() {
        return Err(RepoGateError::InvalidInput("Missing file path".into()));
    }
    let relative = Path::new(path);
    let mut has_file_component = false;
    for component in relative.components() {
        match component {
            Component::Normal(part) if part == ".git" => {
                return Err(RepoGateError::InvalidInput(format!(
                    "Path points into repository metadata: {}",
                    path
                )));
            }
            Component::Normal(_) => has_file_component = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(RepoGateError::InvalidInput(format!(
                    "Path must be relative to the repository root: {}",
                    path
                )));
            }
        }
    }
    if !has_file_component {
        return Err(RepoGateError::InvalidInput(format!("Invalid file path: {}", path)));
    }
    Ok(relative.to_path_buf())
}

/// Join `relative` onto `root`, refusing any symlink along the way that
/// resolves outside the checkout or does not resolve at all.
async fn confine(root: &Path, relative: &Path, path: &str) -> Result<PathBuf> {
    let root_real = fs::canonicalize(root).await?;
    let escape = || {
        RepoGateError::InvalidInput(format!("Path escapes the repository: {}", path))
    };

    let mut current = root_real.clone();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        current.push(part);
        match fs::symlink_metadata(&current).await {
            Ok(meta) if meta.file_type().is_symlink() => {
                let resolved = fs::canonicalize(&current).await.map_err(|_| escape())?;
                if !resolved.starts_with(&root_real) {
                    return Err(escape());
                }
                current = resolved;
            }
            Ok(_) => {}
            // Nothing exists below this point, so there is no link left to follow.
            Err(_) => break,
        }
    }
    Ok(root.join(relative))
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn remove_path(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).await?;
    if meta.is_dir() {
        fs::remove_dir_all(path).await?;
    } else {
        fs::remove_file(path).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_paths() {
        assert_eq!(
            validate_relative_path("a/b.txt").unwrap(),
            PathBuf::from("a/b.txt")
        );
        assert_eq!(
            validate_relative_path("./README.md").unwrap(),
            PathBuf::from("./README.md")
        );
    }

    #[test]
    fn rejects_escaping_paths() {
        for bad in ["../etc/passwd", "a/../../b", "/etc/passwd"] {
            let err = validate_relative_path(bad).unwrap_err();
            assert!(matches!(err, RepoGateError::InvalidInput(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_metadata_and_empty_paths() {
        assert!(validate_relative_path(".git/config").is_err());
        assert!(validate_relative_path("sub/.git/HEAD").is_err());
        assert!(validate_relative_path("").is_err());
        assert!(validate_relative_path(".").is_err());
    }
}
