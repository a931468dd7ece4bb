use crate::data::repository::MissingTeamsPolicy;
use sportsdb_api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub missing_teams: MissingTeamsPolicy,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: DEFAULT_TIMEOUT,
            missing_teams: MissingTeamsPolicy::default(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        // The base URL is fixed at build time; nothing is read at runtime.
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_missing_teams(mut self, policy: MissingTeamsPolicy) -> Self {
        self.missing_teams = policy;
        self
    }
}
