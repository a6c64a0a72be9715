use core::fmt;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::nba::error::Error;

// Every param renders as a `Key=Value` query fragment so endpoints can just
// join them with '&'.

#[derive(Debug, Clone, PartialEq)]
pub enum LeagueID {
    NBA,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Season {
    S(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeasonType {
    Regular,
    Playoffs,
    PreSeason,
    AllStar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContextMeasure {
    FGA,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PerMode {
    Totals,
    PerGame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LastNGames {
    N(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerID(pub i64);

#[derive(Debug, Clone, PartialEq)]
pub enum TeamID {
    All,
    ID(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpponentTeamID(pub TeamID);

#[derive(Debug, Clone, PartialEq)]
pub enum GameID {
    All,
    ID(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OnlyCurrentSeason {
    Yes,
    No,
}

impl Season {
    /// Season label ("2019-20") for the season in progress on `date`.
    /// A season starts in October, so anything before that belongs to the
    /// season that started the previous autumn.
    pub fn at(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 10 {
            date.year()
        } else {
            date.year() - 1
        };
        Season::S(format!("{}-{:02}", start_year, (start_year + 1) % 100))
    }

    pub fn label(&self) -> &str {
        match self {
            Season::S(season) => season,
        }
    }
}

/// Accepts labels like "2019-20", where the second year follows the first.
impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidParam {
            param: "season",
            value: s.to_string(),
        };
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid());
        }
        let start: i32 = start.parse().map_err(|_| invalid())?;
        let end: i32 = end.parse().map_err(|_| invalid())?;
        if (start + 1) % 100 != end {
            return Err(invalid());
        }
        Ok(Season::S(s.to_string()))
    }
}

/// Game ids are ten digits, e.g. "0021900001".
impl FromStr for GameID {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(GameID::ID(s.to_string()))
        } else {
            Err(Error::InvalidParam {
                param: "game id",
                value: s.to_string(),
            })
        }
    }
}

impl Display for LeagueID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeagueID::NBA => write!(f, "LeagueID=00"),
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Season={}", urlencoding::encode(self.label()))
    }
}

impl Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let season_type = match self {
            SeasonType::Regular => "Regular+Season",
            SeasonType::Playoffs => "Playoffs",
            SeasonType::PreSeason => "Pre+Season",
            SeasonType::AllStar => "All+Star",
        };
        write!(f, "SeasonType={}", season_type)
    }
}

impl Display for ContextMeasure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContextMeasure::FGA => write!(f, "ContextMeasure=FGA"),
        }
    }
}

impl Display for PerMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PerMode::Totals => write!(f, "PerMode=Totals"),
            PerMode::PerGame => write!(f, "PerMode=PerGame"),
        }
    }
}

impl Display for LastNGames {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LastNGames::N(n) => write!(f, "LastNGames={}", n),
        }
    }
}

impl Display for PlayerID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PlayerID={}", self.0)
    }
}

impl TeamID {
    fn value(&self) -> i64 {
        match self {
            TeamID::All => 0,
            TeamID::ID(id) => *id,
        }
    }
}

impl Display for TeamID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TeamID={}", self.value())
    }
}

impl Display for OpponentTeamID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OpponentTeamID={}", self.0.value())
    }
}

impl Display for GameID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameID::All => write!(f, "GameID="),
            GameID::ID(id) => write!(f, "GameID={}", urlencoding::encode(id)),
        }
    }
}

impl Display for OnlyCurrentSeason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OnlyCurrentSeason::Yes => write!(f, "IsOnlyCurrentSeason=1"),
            OnlyCurrentSeason::No => write!(f, "IsOnlyCurrentSeason=0"),
        }
    }
}

impl Default for LeagueID {
    fn default() -> Self { LeagueID::NBA }
}

impl Default for Season {
    fn default() -> Self {
        Season::at(chrono::Utc::now().date_naive())
    }
}

impl Default for SeasonType {
    fn default() -> Self { SeasonType::Regular }
}

impl Default for ContextMeasure {
    fn default() -> Self { ContextMeasure::FGA }
}

impl Default for PerMode {
    fn default() -> Self { PerMode::Totals }
}

impl Default for LastNGames {
    fn default() -> Self { LastNGames::N(0) }
}

impl Default for TeamID {
    fn default() -> Self { TeamID::All }
}

impl Default for OpponentTeamID {
    fn default() -> Self { OpponentTeamID(TeamID::All) }
}

impl Default for GameID {
    fn default() -> Self { GameID::All }
}

impl Default for OnlyCurrentSeason {
    fn default() -> Self { OnlyCurrentSeason::No }
}
