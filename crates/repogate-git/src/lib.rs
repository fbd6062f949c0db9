//! RepoGate git integration: keeps a local checkout in sync with its remote
//! and publishes file writes back to it.

pub mod checkout;
pub mod errors;
pub mod redact;
pub mod repo;
pub mod types;
pub mod vcs;

pub use checkout::{validate_relative_path, Checkout};
pub use errors::{GitError, Result};
pub use repo::GitRepository;
pub use types::*;
pub use vcs::{GitCli, VersionControl};
