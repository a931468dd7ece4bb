use crate::data::repository::SportsRepository;
use crate::error::Outcome;
use async_trait::async_trait;
use sportsdb_api::sportsdb::{WireLeague, WireTeam};
use sportsdb_api::{League, MISSING_ID, Team};
use std::sync::Arc;

/// The two read operations the browser depends on.
#[async_trait]
pub trait LeagueQueries: Send + Sync {
    /// Full league catalogue, in server order.
    async fn get_leagues(&self) -> Outcome<Vec<League>>;

    /// Teams of one league, in server order, unfiltered.
    async fn get_teams(&self, league_name: &str) -> Outcome<Vec<Team>>;
}

/// Repository-backed queries. Failures pass through untouched.
#[derive(Clone)]
pub struct SportsQueries {
    repository: Arc<dyn SportsRepository>,
}

impl SportsQueries {
    pub fn new(repository: Arc<dyn SportsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LeagueQueries for SportsQueries {
    async fn get_leagues(&self) -> Outcome<Vec<League>> {
        let leagues = self.repository.get_leagues().await?;
        Ok(leagues.into_iter().map(map_league).collect())
    }

    async fn get_teams(&self, league_name: &str) -> Outcome<Vec<Team>> {
        let teams = self.repository.get_teams(league_name).await?;
        Ok(teams.into_iter().map(map_team).collect())
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire records → domain records
// ---------------------------------------------------------------------------

fn map_league(raw: WireLeague) -> League {
    League {
        id: raw.id_league.unwrap_or(MISSING_ID),
        name: raw.str_league.unwrap_or_default(),
    }
}

fn map_team(raw: WireTeam) -> Team {
    Team {
        id: raw.id_team.unwrap_or(MISSING_ID),
        name: raw.str_team.unwrap_or_default(),
        logo: raw.str_team_badge,
    }
}
