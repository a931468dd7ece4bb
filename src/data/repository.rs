use crate::error::{Outcome, SportsError};
use async_trait::async_trait;
use log::{debug, warn};
use sportsdb_api::client::{ApiResult, SportsDbApi};
use sportsdb_api::sportsdb::{LeaguesResponse, TeamsResponse, WireLeague, WireTeam};

/// Transport port: the two raw HTTP calls. Errors here are thrown upward
/// and caught by the repository.
#[async_trait]
pub trait SportsRemote: Send + Sync {
    async fn fetch_leagues(&self) -> ApiResult<LeaguesResponse>;
    async fn fetch_teams(&self, league_name: &str) -> ApiResult<TeamsResponse>;
}

#[async_trait]
impl SportsRemote for SportsDbApi {
    async fn fetch_leagues(&self) -> ApiResult<LeaguesResponse> {
        SportsDbApi::fetch_leagues(self).await
    }

    async fn fetch_teams(&self, league_name: &str) -> ApiResult<TeamsResponse> {
        SportsDbApi::fetch_teams(self, league_name).await
    }
}

/// Typed-outcome boundary over the remote. Implementations never panic or
/// propagate transport errors any other way than `Err`.
#[async_trait]
pub trait SportsRepository: Send + Sync {
    async fn get_leagues(&self) -> Outcome<Vec<WireLeague>>;
    async fn get_teams(&self, league_name: &str) -> Outcome<Vec<WireTeam>>;
}

/// What an absent `teams` field means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTeamsPolicy {
    /// `Err(NoDataForLeague)`.
    #[default]
    Fail,
    /// `Ok([])`.
    Empty,
}

pub struct RemoteSportsRepository<R> {
    remote: R,
    missing_teams: MissingTeamsPolicy,
}

impl<R: SportsRemote> RemoteSportsRepository<R> {
    pub fn new(remote: R) -> Self {
        Self { remote, missing_teams: MissingTeamsPolicy::default() }
    }

    pub fn with_missing_teams(mut self, policy: MissingTeamsPolicy) -> Self {
        self.missing_teams = policy;
        self
    }
}

#[async_trait]
impl<R: SportsRemote> SportsRepository for RemoteSportsRepository<R> {
    async fn get_leagues(&self) -> Outcome<Vec<WireLeague>> {
        match self.remote.fetch_leagues().await {
            // Absent list means an empty catalogue.
            Ok(resp) => {
                let leagues = resp.leagues.unwrap_or_default();
                debug!("fetched {} leagues", leagues.len());
                Ok(leagues)
            }
            Err(e) => {
                warn!("failed to fetch leagues: {e}");
                Err(SportsError::from(e))
            }
        }
    }

    async fn get_teams(&self, league_name: &str) -> Outcome<Vec<WireTeam>> {
        let resp = match self.remote.fetch_teams(league_name).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("failed to fetch teams for {league_name}: {e}");
                return Err(SportsError::from(e));
            }
        };

        match (resp.teams, self.missing_teams) {
            (Some(teams), _) => {
                debug!("fetched {} teams for {league_name}", teams.len());
                Ok(teams)
            }
            (None, MissingTeamsPolicy::Empty) => {
                debug!("no teams for {league_name}, returning empty list");
                Ok(Vec::new())
            }
            (None, MissingTeamsPolicy::Fail) => {
                warn!("no team data for {league_name}");
                Err(SportsError::NoDataForLeague { league: league_name.to_owned() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportsdb_api::client::ApiError;
    use parking_lot::Mutex;

    /// Canned remote that records which league names it was asked about.
    #[derive(Default)]
    struct FakeRemote {
        leagues: Option<LeaguesResponse>,
        teams: Option<TeamsResponse>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SportsRemote for FakeRemote {
        async fn fetch_leagues(&self) -> ApiResult<LeaguesResponse> {
            self.calls.lock().push("leagues".into());
            self.leagues
                .clone()
                .ok_or_else(|| ApiError::Other("connection reset".into()))
        }

        async fn fetch_teams(&self, league_name: &str) -> ApiResult<TeamsResponse> {
            self.calls.lock().push(league_name.to_owned());
            self.teams
                .clone()
                .ok_or_else(|| ApiError::Other("connection reset".into()))
        }
    }

    fn wire_league(id: i64, name: &str) -> WireLeague {
        WireLeague { id_league: Some(id), str_league: Some(name.into()) }
    }

    fn wire_team(id: i64, name: &str, badge: &str) -> WireTeam {
        WireTeam {
            id_team: Some(id),
            str_team: Some(name.into()),
            str_team_badge: Some(badge.into()),
        }
    }

    #[tokio::test]
    async fn get_leagues_success_passes_wire_records_through() {
        let leagues = vec![wire_league(1, "AAA"), wire_league(2, "BBB"), wire_league(3, "CCC")];
        let remote = FakeRemote {
            leagues: Some(LeaguesResponse { leagues: Some(leagues.clone()) }),
            ..Default::default()
        };
        let repo = RemoteSportsRepository::new(remote);

        let result = repo.get_leagues().await.unwrap();

        assert_eq!(result, leagues);
        assert_eq!(*repo.remote.calls.lock(), vec!["leagues".to_owned()]);
    }

    #[tokio::test]
    async fn get_leagues_failure_is_an_outcome_not_a_panic() {
        let repo = RemoteSportsRepository::new(FakeRemote::default());
        let err = repo.get_leagues().await.unwrap_err();
        assert!(matches!(err, SportsError::Transport(_)), "got {err}");
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn get_teams_success_uses_requested_league() {
        let teams = vec![wire_team(1, "AAA", "logoAAA"), wire_team(2, "BBB", "logoBBB")];
        let remote = FakeRemote {
            teams: Some(TeamsResponse { teams: Some(teams.clone()) }),
            ..Default::default()
        };
        let repo = RemoteSportsRepository::new(remote);

        assert_eq!(repo.get_teams("toto").await.unwrap(), teams);
        assert_eq!(*repo.remote.calls.lock(), vec!["toto".to_owned()]);
    }

    #[tokio::test]
    async fn get_teams_transport_failure() {
        let repo = RemoteSportsRepository::new(FakeRemote::default());
        let err = repo.get_teams("toto").await.unwrap_err();
        assert!(matches!(err, SportsError::Transport(_)), "got {err}");
    }

    #[tokio::test]
    async fn absent_team_list_fails_by_default() {
        let remote = FakeRemote {
            teams: Some(TeamsResponse { teams: None }),
            ..Default::default()
        };
        let repo = RemoteSportsRepository::new(remote);

        let err = repo.get_teams("toto").await.unwrap_err();
        assert!(matches!(&err, SportsError::NoDataForLeague { league } if league == "toto"));
        assert_eq!(err.to_string(), "No data for this league: toto");
    }

    #[tokio::test]
    async fn absent_team_list_is_empty_under_lenient_policy() {
        let remote = FakeRemote {
            teams: Some(TeamsResponse { teams: None }),
            ..Default::default()
        };
        let repo = RemoteSportsRepository::new(remote).with_missing_teams(MissingTeamsPolicy::Empty);

        assert_eq!(repo.get_teams("toto").await.unwrap(), Vec::<WireTeam>::new());
    }

    #[tokio::test]
    async fn empty_team_list_is_success_under_either_policy() {
        for policy in [MissingTeamsPolicy::Fail, MissingTeamsPolicy::Empty] {
            let remote = FakeRemote {
                teams: Some(TeamsResponse { teams: Some(vec![]) }),
                ..Default::default()
            };
            let repo = RemoteSportsRepository::new(remote).with_missing_teams(policy);
            assert!(repo.get_teams("toto").await.unwrap().is_empty(), "{policy:?}");
        }
    }

    #[tokio::test]
    async fn http_null_payload_through_real_client() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search_all_teams.php")
            .match_query(mockito::Matcher::UrlEncoded("l".into(), "Nowhere".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"teams":null}"#)
            .create_async()
            .await;

        let repo = RemoteSportsRepository::new(SportsDbApi::with_base_url(server.url()));
        let err = repo.get_teams("Nowhere").await.unwrap_err();
        assert!(matches!(err, SportsError::NoDataForLeague { .. }));
    }
}
