use std::collections::HashMap;

use log::debug;
use polars::prelude::*;

use crate::nba::client::StatsClient;
use crate::nba::endpoints::{NBAEndpoint, PlayerProfileV2};
use crate::nba::error::{Error, Result};
use crate::nba::frames::cell_str;
use crate::nba::params::{PlayerID, TeamID};
use crate::nba::players::Player;

// (id, abbreviation, full name)
const NBA_TEAMS: [(i64, &str, &str); 30] = [
    (1610612737, "ATL", "Atlanta Hawks"),
    (1610612738, "BOS", "Boston Celtics"),
    (1610612739, "CLE", "Cleveland Cavaliers"),
    (1610612740, "NOP", "New Orleans Pelicans"),
    (1610612741, "CHI", "Chicago Bulls"),
    (1610612742, "DAL", "Dallas Mavericks"),
    (1610612743, "DEN", "Denver Nuggets"),
    (1610612744, "GSW", "Golden State Warriors"),
    (1610612745, "HOU", "Houston Rockets"),
    (1610612746, "LAC", "LA Clippers"),
    (1610612747, "LAL", "Los Angeles Lakers"),
    (1610612748, "MIA", "Miami Heat"),
    (1610612749, "MIL", "Milwaukee Bucks"),
    (1610612750, "MIN", "Minnesota Timberwolves"),
    (1610612751, "BKN", "Brooklyn Nets"),
    (1610612752, "NYK", "New York Knicks"),
    (1610612753, "ORL", "Orlando Magic"),
    (1610612754, "IND", "Indiana Pacers"),
    (1610612755, "PHI", "Philadelphia 76ers"),
    (1610612756, "PHX", "Phoenix Suns"),
    (1610612757, "POR", "Portland Trail Blazers"),
    (1610612758, "SAC", "Sacramento Kings"),
    (1610612759, "SAS", "San Antonio Spurs"),
    (1610612760, "OKC", "Oklahoma City Thunder"),
    (1610612761, "TOR", "Toronto Raptors"),
    (1610612762, "UTA", "Utah Jazz"),
    (1610612763, "MEM", "Memphis Grizzlies"),
    (1610612764, "WAS", "Washington Wizards"),
    (1610612765, "DET", "Detroit Pistons"),
    (1610612766, "CHA", "Charlotte Hornets"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub abbreviation: String,
    pub full_name: String,
}

impl Team {
    pub fn team_id(&self) -> TeamID {
        TeamID::ID(self.id)
    }
}

/// Franchises keyed by abbreviation ("HOU", "BKN").
#[derive(Debug, Default)]
pub struct TeamCatalog {
    teams: HashMap<String, Team>,
}

impl TeamCatalog {
    /// The thirty current franchises. The list is static, no request is made.
    pub fn nba() -> Self {
        TeamCatalog::from_teams(NBA_TEAMS.iter().map(|&(id, abbreviation, full_name)| Team {
            id,
            abbreviation: abbreviation.to_string(),
            full_name: full_name.to_string(),
        }))
    }

    pub fn from_teams<I>(teams: I) -> Self
    where
        I: IntoIterator<Item = Team>,
    {
        TeamCatalog {
            teams: teams
                .into_iter()
                .map(|t| (t.abbreviation.to_uppercase(), t))
                .collect(),
        }
    }

    /// Case-insensitive abbreviation lookup.
    pub fn get(&self, abbreviation: &str) -> Result<&Team> {
        self.teams
            .get(&abbreviation.to_uppercase())
            .ok_or_else(|| Error::TeamNotFound(abbreviation.to_string()))
    }

    pub fn by_id(&self, id: i64) -> Option<&Team> {
        self.teams.values().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Teams sorted by abbreviation.
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        let mut teams: Vec<&Team> = self.teams.values().collect();
        teams.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
        teams.into_iter()
    }

    /// `TEAM_ID`, `ABBREVIATION`, `FULL_NAME`, sorted by abbreviation.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let teams: Vec<&Team> = self.iter().collect();
        Ok(DataFrame::new(vec![
            Series::new("TEAM_ID", teams.iter().map(|t| t.id).collect::<Vec<i64>>()),
            Series::new("ABBREVIATION", teams.iter().map(|t| t.abbreviation.as_str()).collect::<Vec<&str>>()),
            Series::new("FULL_NAME", teams.iter().map(|t| t.full_name.as_str()).collect::<Vec<&str>>()),
        ])?)
    }
}

/// The team the player appeared for most recently, read from the last
/// regular season row of the profile. Rows that don't name a franchise
/// (the "TOT" line of a traded season) are skipped.
pub fn current_team<'a>(client: &dyn StatsClient, player: &Player, teams: &'a TeamCatalog) -> Result<&'a Team> {
    let payload = PlayerProfileV2::new(PlayerID(player.id)).send_request(client)?;
    let totals = payload.result_set(PlayerProfileV2::RESULT_SET)?;
    if totals.is_empty() {
        return Err(Error::TeamNotFound(format!("no seasons on record for {}", player.full_name)));
    }
    let abbreviation_col = totals.column("TEAM_ABBREVIATION")?;
    let team = totals
        .row_set
        .iter()
        .rev()
        .filter_map(|row| row.get(abbreviation_col).and_then(cell_str))
        .find_map(|abbreviation| teams.get(&abbreviation).ok())
        .ok_or_else(|| Error::TeamNotFound(format!("no current team for {}", player.full_name)))?;
    debug!("{} currently plays for {}", player.full_name, team.abbreviation);
    Ok(team)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_franchises() {
        let teams = TeamCatalog::nba();
        assert_eq!(teams.len(), 30);
        assert_eq!(teams.get("HOU").unwrap().id, 1610612745);
        assert_eq!(teams.get("bkn").unwrap().full_name, "Brooklyn Nets");
        assert_eq!(teams.by_id(1610612747).unwrap().abbreviation, "LAL");
    }

    #[test]
    fn unknown_abbreviation_is_not_found() {
        match TeamCatalog::nba().get("SEA") {
            Err(Error::TeamNotFound(abbr)) => assert_eq!(abbr, "SEA"),
            other => panic!("expected TeamNotFound, got {:?}", other),
        }
    }

    #[test]
    fn iteration_and_frame_are_sorted() {
        let teams = TeamCatalog::nba();
        let abbrs: Vec<&str> = teams.iter().map(|t| t.abbreviation.as_str()).take(3).collect();
        assert_eq!(abbrs, vec!["ATL", "BKN", "BOS"]);
        let df = teams.to_dataframe().unwrap();
        assert_eq!(df.height(), 30);
        assert_eq!(df.get_column_names(), vec!["TEAM_ID", "ABBREVIATION", "FULL_NAME"]);
    }

    #[test]
    fn team_id_param() {
        let teams = TeamCatalog::nba();
        assert_eq!(teams.get("MIL").unwrap().team_id().to_string(), "TeamID=1610612749");
    }
}
