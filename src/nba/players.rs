use std::collections::HashMap;

use log::debug;
use polars::prelude::*;

use crate::nba::client::StatsClient;
use crate::nba::endpoints::{CommonAllPlayers, NBAEndpoint};
use crate::nba::error::{Error, Result};
use crate::nba::frames::{cell_i64, cell_str, ResultSet};

/// One roster entry. Handles are borrowed out of a [`PlayerCatalog`] and
/// passed to the shot and career fetchers.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub full_name: String,
    pub is_active: bool,
    pub team_abbreviation: Option<String>,
    pub from_year: Option<i64>,
    pub to_year: Option<i64>,
}

impl Player {
    pub fn new(id: i64, full_name: impl Into<String>, is_active: bool) -> Self {
        Player {
            id,
            full_name: full_name.into(),
            is_active,
            team_abbreviation: None,
            from_year: None,
            to_year: None,
        }
    }

    pub fn years(&self) -> String {
        match (self.from_year, self.to_year) {
            (Some(from), Some(to)) => format!("{} - {}", from, to),
            (Some(from), None) => format!("{} -", from),
            _ => String::new(),
        }
    }
}

/// Name-keyed view over the provider roster. Built once, read-only after.
#[derive(Debug, Default)]
pub struct PlayerCatalog {
    players: HashMap<String, Player>,
    overwritten: usize,
}

impl PlayerCatalog {
    /// Fetches the roster and indexes it by full name. With `active_only`
    /// set, retired and unrostered players are left out.
    pub fn fetch(client: &dyn StatsClient, roster: &CommonAllPlayers, active_only: bool) -> Result<Self> {
        let payload = roster.send_request(client)?;
        let roster_set = payload.result_set(CommonAllPlayers::RESULT_SET)?;
        let players = players_from_roster(roster_set)?;
        Ok(PlayerCatalog::from_players(players, active_only))
    }

    /// Two roster entries with the same name: the later one replaces the
    /// earlier one.
    pub fn from_players<I>(players: I, active_only: bool) -> Self
    where
        I: IntoIterator<Item = Player>,
    {
        let mut catalog = PlayerCatalog::default();
        for player in players.into_iter().filter(|p| !active_only || p.is_active) {
            if let Some(previous) = catalog.players.insert(player.full_name.clone(), player) {
                debug!("duplicate roster name {}, replacing id {}", previous.full_name, previous.id);
                catalog.overwritten += 1;
            }
        }
        debug!("catalog built with {} players", catalog.players.len());
        catalog
    }

    pub fn get(&self, name: &str) -> Result<&Player> {
        self.players
            .get(name)
            .ok_or_else(|| Error::PlayerNotFound(name.to_string()))
    }

    /// Case-insensitive substring match on names, sorted by name.
    pub fn search(&self, keyword: &str) -> Vec<&Player> {
        let keyword = keyword.to_lowercase();
        let mut found: Vec<&Player> = self
            .players
            .values()
            .filter(|p| p.full_name.to_lowercase().contains(&keyword))
            .collect();
        found.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        found
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of roster entries dropped because a later one had the same name.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// `PERSON_ID`, `FULL_NAME`, `IS_ACTIVE`, sorted by name.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        let ids: Vec<i64> = players.iter().map(|p| p.id).collect();
        let names: Vec<&str> = players.iter().map(|p| p.full_name.as_str()).collect();
        let active: Vec<bool> = players.iter().map(|p| p.is_active).collect();
        Ok(DataFrame::new(vec![
            Series::new("PERSON_ID", ids),
            Series::new("FULL_NAME", names),
            Series::new("IS_ACTIVE", active),
        ])?)
    }
}

pub(crate) fn players_from_roster(roster_set: &ResultSet) -> Result<Vec<Player>> {
    let id_col = roster_set.column("PERSON_ID")?;
    let name_col = roster_set.column("DISPLAY_FIRST_LAST")?;
    let status_col = roster_set.column("ROSTERSTATUS")?;
    // Optional extras, older seasons don't always carry them
    let team_col = roster_set.column("TEAM_ABBREVIATION").ok();
    let from_col = roster_set.column("FROM_YEAR").ok();
    let to_col = roster_set.column("TO_YEAR").ok();

    let mut players = Vec::with_capacity(roster_set.len());
    for row in &roster_set.row_set {
        let cell = |col: usize| {
            row.get(col)
                .ok_or_else(|| Error::malformed(format!("roster row too short: {} cells", row.len())))
        };
        let id = cell_i64(cell(id_col)?, "PERSON_ID")?;
        let full_name = cell_str(cell(name_col)?)
            .ok_or_else(|| Error::malformed(format!("player {} has no name", id)))?;
        let is_active = roster_status(cell(status_col)?)?;
        let optional = |col: Option<usize>| col.and_then(|c| row.get(c)).and_then(cell_str).filter(|s| !s.is_empty());
        players.push(Player {
            id,
            full_name,
            is_active,
            team_abbreviation: optional(team_col),
            from_year: optional(from_col).and_then(|y| y.parse().ok()),
            to_year: optional(to_col).and_then(|y| y.parse().ok()),
        });
    }
    Ok(players)
}

// ROSTERSTATUS is 1/0 in current payloads; older ones used "Active"/"Inactive"
fn roster_status(v: &serde_json::Value) -> Result<bool> {
    match v {
        serde_json::Value::Null => Ok(false),
        serde_json::Value::String(s) if s.eq_ignore_ascii_case("active") => Ok(true),
        serde_json::Value::String(s) if s.eq_ignore_ascii_case("inactive") || s.is_empty() => Ok(false),
        other => Ok(cell_i64(other, "ROSTERSTATUS")? == 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nba::frames::Payload;
    use serde_json::json;

    fn roster() -> Vec<Player> {
        vec![
            Player::new(201935, "James Harden", true),
            Player::new(1, "Retired Guy", false),
            Player::new(2544, "LeBron James", true),
        ]
    }

    #[test]
    fn active_filter_keeps_only_active_players() {
        let catalog = PlayerCatalog::from_players(roster(), true);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.iter().all(|p| p.is_active));
        assert!(catalog.get("Retired Guy").is_err());
    }

    #[test]
    fn no_filter_keeps_everyone() {
        let catalog = PlayerCatalog::from_players(roster(), false);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("Retired Guy").unwrap().id, 1);
    }

    #[test]
    fn lookup_miss_is_not_found() {
        let catalog = PlayerCatalog::from_players(roster(), false);
        match catalog.get("Nobody") {
            Err(Error::PlayerNotFound(name)) => assert_eq!(name, "Nobody"),
            other => panic!("expected PlayerNotFound, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_names_last_one_wins() {
        let players = vec![
            Player::new(10, "Marcus Williams", false),
            Player::new(20, "Marcus Williams", false),
        ];
        let catalog = PlayerCatalog::from_players(players, false);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Marcus Williams").unwrap().id, 20);
        assert_eq!(catalog.overwritten(), 1);
    }

    #[test]
    fn search_is_case_insensitive_and_sorted() {
        let catalog = PlayerCatalog::from_players(roster(), false);
        let names: Vec<&str> = catalog.search("JAMES").iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["James Harden", "LeBron James"]);
    }

    #[test]
    fn dataframe_view_is_sorted_by_name() {
        let catalog = PlayerCatalog::from_players(roster(), false);
        let df = catalog.to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.get_column_names(), vec!["PERSON_ID", "FULL_NAME", "IS_ACTIVE"]);
        let ids: Vec<Option<i64>> = df.column("PERSON_ID").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(ids, vec![Some(201935), Some(2544), Some(1)]);
    }

    #[test]
    fn roster_rows_decode() {
        let payload = Payload::from_value(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_LAST_COMMA_FIRST", "DISPLAY_FIRST_LAST", "ROSTERSTATUS",
                            "FROM_YEAR", "TO_YEAR", "TEAM_ABBREVIATION"],
                "rowSet": [
                    [201935, "Harden, James", "James Harden", 1, "2009", "2019", "HOU"],
                    [76001, "Abdelnaby, Alaa", "Alaa Abdelnaby", 0, "1990", "1994", ""],
                    [76002, "Abdul-Aziz, Zaid", "Zaid Abdul-Aziz", "Inactive", "1968", "1977", null]
                ]
            }]
        }))
        .unwrap();
        let players = players_from_roster(payload.result_set("CommonAllPlayers").unwrap()).unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].full_name, "James Harden");
        assert!(players[0].is_active);
        assert_eq!(players[0].team_abbreviation.as_deref(), Some("HOU"));
        assert_eq!(players[0].years(), "2009 - 2019");
        assert!(!players[1].is_active);
        assert_eq!(players[1].team_abbreviation, None);
        assert!(!players[2].is_active);
    }

    #[test]
    fn roster_without_status_column_is_malformed() {
        let payload = Payload::from_value(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST"],
                "rowSet": [[1, "A B"]]
            }]
        }))
        .unwrap();
        let err = players_from_roster(payload.result_set("CommonAllPlayers").unwrap()).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }
}
