use crate::errors::*;
use git2::{Repository, RepositoryOpenFlags};
use std::path::Path;

/// Read-only view of a working copy through libgit2.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository rooted exactly at `path`; parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let repo = Repository::open_ext(
            path_ref,
            RepositoryOpenFlags::NO_SEARCH,
            &[] as &[&std::ffi::OsStr],
        )
        .map_err(|_| GitError::RepoNotFound(path_ref.display().to_string()))?;
        Ok(Self { repo })
    }

    /// True when `path` holds a non-bare repository with a working tree.
    pub fn is_checkout<P: AsRef<Path>>(path: P) -> bool {
        match Self::open(path) {
            Ok(repo) => !repo.is_bare() && repo.workdir().is_some(),
            Err(_) => false,
        }
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(head.shorthand().map(|s| s.to_string()))
    }

    /// Full sha of the commit `HEAD` points at, or `None` on an unborn branch.
    pub fn head_commit(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(head.peel_to_commit()?.id().to_string()))
    }
}
