/// TheSportsDB raw wire types: serde shapes for the v1 JSON responses.
/// These map to our clean domain types in the query layer of the app crate.
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// all_leagues.php
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct LeaguesResponse {
    /// `null` or missing when the server has nothing to return.
    pub leagues: Option<Vec<WireLeague>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct WireLeague {
    #[serde(rename = "idLeague", default, deserialize_with = "lenient_id")]
    pub id_league: Option<i64>,
    #[serde(rename = "strLeague")]
    pub str_league: Option<String>,
}

// ---------------------------------------------------------------------------
// search_all_teams.php
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct TeamsResponse {
    /// `null` when no team matches the requested league.
    pub teams: Option<Vec<WireTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct WireTeam {
    #[serde(rename = "idTeam", default, deserialize_with = "lenient_id")]
    pub id_team: Option<i64>,
    #[serde(rename = "strTeam")]
    pub str_team: Option<String>,
    /// Older API versions call this `strTeamBadge`, newer ones `strBadge`.
    #[serde(rename = "strTeamBadge", alias = "strBadge")]
    pub str_team_badge: Option<String>,
}

// TheSportsDB sends ids as strings ("4328"); some mirrors send numbers.
// Any other shape decodes as absent instead of failing the whole payload.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.and_then(|id| match id {
        RawId::Number(n) => Some(n),
        RawId::Text(s) => s.trim().parse().ok(),
        RawId::Other(_) => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_ids_accept_strings_and_numbers() {
        let raw = r#"{"leagues":[
            {"idLeague":"4328","strLeague":"English Premier League"},
            {"idLeague":4329,"strLeague":"English League Championship"},
            {"idLeague":"n/a","strLeague":"Broken"},
            {"strLeague":"No Id"}
        ]}"#;
        let resp: LeaguesResponse = serde_json::from_str(raw).unwrap();
        let ids: Vec<Option<i64>> = resp.leagues.unwrap().iter().map(|l| l.id_league).collect();
        assert_eq!(ids, vec![Some(4328), Some(4329), None, None]);
    }

    #[test]
    fn odd_ids_decode_as_absent_without_rejecting_the_payload() {
        let raw = r#"{"leagues":[
            {"idLeague":1.5,"strLeague":"Float"},
            {"idLeague":true,"strLeague":"Bool"},
            {"idLeague":{},"strLeague":"Object"},
            {"idLeague":[4328],"strLeague":"Array"},
            {"idLeague":18446744073709551615,"strLeague":"Too Big"},
            {"idLeague":"4335","strLeague":"Spanish La Liga"}
        ]}"#;
        let leagues = serde_json::from_str::<LeaguesResponse>(raw).unwrap().leagues.unwrap();
        let ids: Vec<Option<i64>> = leagues.iter().map(|l| l.id_league).collect();
        assert_eq!(ids, vec![None, None, None, None, None, Some(4335)]);
        assert_eq!(leagues[0].str_league.as_deref(), Some("Float"));

        let teams: TeamsResponse =
            serde_json::from_str(r#"{"teams":[{"idTeam":false,"strTeam":"Arsenal"}]}"#).unwrap();
        assert_eq!(teams.teams.unwrap()[0].id_team, None);
    }

    #[test]
    fn null_and_missing_teams_decode_as_none() {
        let null: TeamsResponse = serde_json::from_str(r#"{"teams":null}"#).unwrap();
        let missing: TeamsResponse = serde_json::from_str("{}").unwrap();
        assert!(null.teams.is_none());
        assert!(missing.teams.is_none());
    }

    #[test]
    fn team_badge_accepts_both_field_names() {
        let raw = r#"{"teams":[
            {"idTeam":"133604","strTeam":"Arsenal","strTeamBadge":"https://img/arsenal.png"},
            {"idTeam":"133601","strTeam":"Aston Villa","strBadge":"https://img/villa.png"},
            {"idTeam":null,"strTeam":null}
        ]}"#;
        let teams = serde_json::from_str::<TeamsResponse>(raw).unwrap().teams.unwrap();
        assert_eq!(teams[0].str_team_badge.as_deref(), Some("https://img/arsenal.png"));
        assert_eq!(teams[1].str_team_badge.as_deref(), Some("https://img/villa.png"));
        assert_eq!(teams[2], WireTeam::default());
    }
}
