//! Shared types, errors and configuration for the RepoGate service.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    CommitConfig, ConfigManager, CredentialsConfig, LoggingConfig, RepositoryConfig,
    SearchConfig, ServerConfig, Settings,
};
pub use error::*;
pub use types::*;
