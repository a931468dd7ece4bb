use crate::sportsdb::{LeaguesResponse, TeamsResponse};
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// TheSportsDB v1 JSON API, free tier key. Override at build time with
/// `SPORTSDB_API_BASE`.
pub const DEFAULT_BASE_URL: &str = match option_env!("SPORTSDB_API_BASE") {
    Some(base) => base,
    None => "https://www.thesportsdb.com/api/v1/json/3",
};
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TheSportsDB client. Only the two read endpoints the league browser needs.
#[derive(Debug, Clone)]
pub struct SportsDbApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for SportsDbApi {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::Other(_) => None,
        }
    }
}

impl SportsDbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a local mock server in tests.
    /// A trailing slash is tolerated.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::builder()
                .user_agent(concat!("sportsdb-api/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every league TheSportsDB knows about.
    pub async fn fetch_leagues(&self) -> ApiResult<LeaguesResponse> {
        let url = self.endpoint("all_leagues.php", &[])?;
        self.get(url).await
    }

    /// Fetch all teams of a league. The server matches `league_name` by its
    /// own rules; an unknown league yields `teams: null`, not an error.
    pub async fn fetch_teams(&self, league_name: &str) -> ApiResult<TeamsResponse> {
        let url = self.endpoint("search_all_teams.php", &[("l", league_name)])?;
        self.get(url).await
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Url> {
        let raw = format!("{}/{path}", self.base_url);
        let mut url =
            Url::parse(&raw).map_err(|e| ApiError::Other(format!("invalid url {raw}: {e}")))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let url_str = url.to_string();
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url_str.clone()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url_str)),
            Err(e) => Err(ApiError::Api(e, url_str)),
        }
    }
}
