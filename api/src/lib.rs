pub mod client;
pub mod sportsdb;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of TheSportsDB wire format
// ---------------------------------------------------------------------------

/// Id used when the server omits one.
pub const MISSING_ID: i64 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct League {
    pub id: i64,
    pub name: String, // "English Premier League"
}

impl League {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Case-insensitive substring match on the league name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>, // badge image URL
}

impl Team {
    pub fn new(id: i64, name: impl Into<String>, logo: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            logo: logo.map(str::to_owned),
        }
    }
}
