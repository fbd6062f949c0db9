use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config as cfg;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const ENV_PREFIX: &str = "REPOGATE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Remote to clone from and push to, without credentials.
    #[serde(default)]
    pub remote_url: String,
    #[serde(default = "RepositoryConfig::default_local_path")]
    pub local_path: PathBuf,
    #[serde(default = "RepositoryConfig::default_remote_name")]
    pub remote_name: String,
    #[serde(default = "RepositoryConfig::default_branch")]
    pub branch: String,
}

impl RepositoryConfig {
    fn default_local_path() -> PathBuf {
        PathBuf::from("repo_local")
    }

    fn default_remote_name() -> String {
        "origin".to_string()
    }

    fn default_branch() -> String {
        "main".to_string()
    }

    /// The remote URL with credentials embedded, for clone and push.
    ///
    /// Only http(s) remotes get credentials; local paths, ssh remotes and
    /// half-configured credential pairs are returned unchanged.
    pub fn authenticated_url(&self, credentials: &CredentialsConfig) -> String {
        let (Some(username), Some(token)) = (&credentials.username, &credentials.token) else {
            return self.remote_url.clone();
        };
        let Ok(mut url) = url::Url::parse(&self.remote_url) else {
            return self.remote_url.clone();
        };
        if !matches!(url.scheme(), "http" | "https") {
            return self.remote_url.clone();
        }
        if url.set_username(username).is_err()
            || url.set_password(Some(token.expose_secret())).is_err()
        {
            return self.remote_url.clone();
        }
        url.to_string()
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            remote_url: String::new(),
            local_path: Self::default_local_path(),
            remote_name: Self::default_remote_name(),
            branch: Self::default_branch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,
    // Never serialized; deserialization from config files or env only.
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitConfig {
    #[serde(default = "CommitConfig::default_author_name")]
    pub author_name: String,
    #[serde(default = "CommitConfig::default_author_email")]
    pub author_email: String,
    /// `{path}` is replaced with the written file's relative path.
    #[serde(default = "CommitConfig::default_message_template")]
    pub message_template: String,
}

impl CommitConfig {
    fn default_author_name() -> String {
        "repogate".to_string()
    }

    fn default_author_email() -> String {
        "repogate@localhost".to_string()
    }

    fn default_message_template() -> String {
        "Auto-update {path}".to_string()
    }
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            author_name: Self::default_author_name(),
            author_email: Self::default_author_email(),
            message_template: Self::default_message_template(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Cap on hits per search; unbounded when unset.
    #[serde(default)]
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub commit: CommitConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host cannot be empty"
        );
        anyhow::ensure!(self.server.port > 0, "server.port must be > 0");
        anyhow::ensure!(
            !self.repository.remote_url.trim().is_empty(),
            "repository.remote_url cannot be empty"
        );
        anyhow::ensure!(
            !self.repository.local_path.as_os_str().is_empty(),
            "repository.local_path cannot be empty"
        );
        anyhow::ensure!(
            !self.repository.branch.trim().is_empty(),
            "repository.branch cannot be empty"
        );
        anyhow::ensure!(
            !self.repository.remote_name.trim().is_empty(),
            "repository.remote_name cannot be empty"
        );
        anyhow::ensure!(
            self.commit.message_template.contains("{path}"),
            "commit.message_template must contain {{path}}"
        );
        anyhow::ensure!(
            self.search.max_results != Some(0),
            "search.max_results must be > 0 when set"
        );
        Ok(())
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Resolve the configuration directory.
    ///
    /// Priority order:
    /// 1. explicit path
    /// 2. ./config/
    /// 3. current directory
    pub fn config_dir(custom_path: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = custom_path {
            return dir;
        }
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_config = cwd.join("config");
        if project_config.exists() {
            return project_config;
        }
        cwd
    }

    pub fn environment(env_override: Option<String>) -> String {
        env_override
            .or_else(|| env::var("APP_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    /// Load and validate settings from files and the environment.
    pub fn load(config_dir: Option<PathBuf>, env_override: Option<String>) -> Result<Settings> {
        let dir = Self::config_dir(config_dir);
        let env_name = Self::environment(env_override);
        info!("Loading configuration from {:?} (env: {})", dir, env_name);
        let settings = Self::load_from_sources(&dir, &env_name)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_sources(config_dir: &Path, env_name: &str) -> Result<Settings> {
        let mut builder = cfg::Config::builder()
            .add_source(cfg::File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                cfg::File::from(config_dir.join(format!("{}.toml", env_name))).required(false),
            )
            .add_source(cfg::File::from(config_dir.join("local.toml")).required(false))
            .add_source(cfg::Environment::with_prefix(ENV_PREFIX).separator("__"));

        // Hosting platforms hand the listening port over as plain PORT.
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.trim().parse::<i64>().ok()) {
            debug!("Using PORT={} from environment", port);
            builder = builder
                .set_override("server.port", port)
                .context("applying PORT override")?;
        }

        let settings: Settings = builder
            .build()
            .context("building configuration")?
            .try_deserialize()
            .context("deserializing configuration")?;
        Ok(settings)
    }
}
