use crate::redact::redact_credentials;
use repogate_core::Settings;
use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The index had no staged changes, so no commit was created.
    NothingToCommit,
}

/// Everything the checkout needs to know about where it lives and where it publishes.
#[derive(Clone)]
pub struct CheckoutConfig {
    pub local_path: PathBuf,
    /// Remote URL with any credentials embedded.
    pub remote_url: String,
    pub remote_name: String,
    pub branch: String,
    pub author_name: String,
    pub author_email: String,
    pub message_template: String,
}

impl CheckoutConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let repo = &settings.repository;
        Self {
            local_path: repo.local_path.clone(),
            remote_url: repo.authenticated_url(&settings.credentials),
            remote_name: repo.remote_name.clone(),
            branch: repo.branch.clone(),
            author_name: settings.commit.author_name.clone(),
            author_email: settings.commit.author_email.clone(),
            message_template: settings.commit.message_template.clone(),
        }
    }

    pub fn commit_message(&self, path: &str) -> String {
        self.message_template.replace("{path}", path)
    }
}

impl fmt::Debug for CheckoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutConfig")
            .field("local_path", &self.local_path)
            .field("remote_url", &redact_credentials(&self.remote_url))
            .field("remote_name", &self.remote_name)
            .field("branch", &self.branch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repogate_core::{CredentialsConfig, RepositoryConfig};

    #[test]
    fn debug_output_hides_token() {
        let settings = Settings {
            repository: RepositoryConfig {
                remote_url: "https://github.com/owner/repo.git".into(),
                ..Default::default()
            },
            credentials: CredentialsConfig {
                username: Some("bot".into()),
                token: Some("hunter2".to_string().into()),
            },
            ..Default::default()
        };
        let config = CheckoutConfig::from_settings(&settings);
        assert!(config.remote_url.contains("hunter2"));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("github.com/owner/repo.git"));
    }

    #[test]
    fn commit_message_uses_template() {
        let config = CheckoutConfig::from_settings(&Settings::default());
        assert_eq!(config.commit_message("docs/x.md"), "Auto-update docs/x.md");
    }
}
