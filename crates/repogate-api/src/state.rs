use repogate_core::Settings;
use repogate_git::{Checkout, CheckoutConfig, GitCli, VersionControl};
use std::sync::Arc;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub checkout: Arc<Checkout>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_vcs(settings, Arc::new(GitCli::new()))
    }

    pub fn with_vcs(settings: Settings, vcs: Arc<dyn VersionControl>) -> Self {
        let checkout = Checkout::new(CheckoutConfig::from_settings(&settings), vcs);
        Self {
            checkout: Arc::new(checkout),
            settings: Arc::new(settings),
        }
    }
}
