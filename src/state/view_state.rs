use crate::state::screen::{ErrorCode, ScreenState};
use sportsdb_api::{League, Team};

/// Everything the browser knows. Only the reducer task mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    /// Full league list, fetched once at startup.
    pub catalogue: Vec<League>,
    pub suggestions: Vec<League>,
    pub teams: Vec<Team>,
    pub loading: bool,
    pub error: Option<ErrorCode>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            catalogue: Vec::new(),
            suggestions: Vec::new(),
            teams: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl ViewState {
    /// Project onto the one renderable state. Precedence: error, loading,
    /// teams, suggestions.
    pub fn screen(&self) -> ScreenState {
        let search_text = self.search_text.clone();
        if let Some(error) = self.error {
            ScreenState::Error { search_text, error }
        } else if self.loading {
            ScreenState::Loading { search_text }
        } else if !self.teams.is_empty() {
            ScreenState::Teams { search_text, teams: self.teams.clone() }
        } else {
            ScreenState::Suggestions { search_text, leagues: self.suggestions.clone() }
        }
    }

    /// Leagues of the catalogue matching the current search text.
    pub fn matching_leagues(&self) -> Vec<League> {
        filter_suggestions(&self.catalogue, &self.search_text)
    }
}

/// Case-insensitive substring filter preserving catalogue order. A blank
/// query matches nothing.
pub fn filter_suggestions(catalogue: &[League], query: &str) -> Vec<League> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    catalogue
        .iter()
        .filter(|league| league.matches(query))
        .cloned()
        .collect()
}
