//! League search and team browsing over TheSportsDB.
//!
//! The presentation layer forwards user intents to a [`LeagueBrowser`] and
//! renders whatever [`ScreenState`] it publishes.

pub mod data;
pub mod domain;
pub mod error;
pub mod state;

pub use error::{Outcome, SportsError};
pub use sportsdb_api::{League, Team};
pub use state::app_settings::AppSettings;
pub use state::reducer::LeagueBrowser;
pub use state::screen::{ErrorCode, ScreenState};
