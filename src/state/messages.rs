use crate::error::Outcome;
use sportsdb_api::{League, Team};

/// User intents forwarded by the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    LoadCatalogue,
    SearchChanged { text: String },
    LeagueSelected { league: League },
    ClearSearch,
}

/// Completed background fetches, tagged with the generation they were
/// dispatched under.
#[derive(Debug)]
pub enum FetchResult {
    Leagues { generation: u64, outcome: Outcome<Vec<League>> },
    Teams { generation: u64, league_name: String, outcome: Outcome<Vec<Team>> },
}
