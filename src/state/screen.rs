use serde::{Deserialize, Serialize};
use sportsdb_api::{League, Team};

/// Displayable failure, shown in place of the list area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    LeaguesLoadFailed,
    TeamsLoadFailed,
}

impl ErrorCode {
    /// Text for the presentation surface's error panel.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::LeaguesLoadFailed => "Unable to load the leagues. Please try again later.",
            ErrorCode::TeamsLoadFailed => "Unable to load the teams of this league.",
        }
    }
}

/// The single renderable projection of the browser state. Every variant
/// carries the search field text so the field stays live in every state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScreenState {
    Loading { search_text: String },
    Suggestions { search_text: String, leagues: Vec<League> },
    Teams { search_text: String, teams: Vec<Team> },
    Error { search_text: String, error: ErrorCode },
}

impl Default for ScreenState {
    fn default() -> Self {
        ScreenState::Loading { search_text: String::new() }
    }
}

impl ScreenState {
    pub fn search_text(&self) -> &str {
        match self {
            ScreenState::Loading { search_text }
            | ScreenState::Suggestions { search_text, .. }
            | ScreenState::Teams { search_text, .. }
            | ScreenState::Error { search_text, .. } => search_text,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading { .. })
    }
}
