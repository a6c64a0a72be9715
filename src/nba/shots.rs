use log::debug;
use polars::prelude::*;

use crate::nba::client::StatsClient;
use crate::nba::endpoints::{NBAEndpoint, ShotChartDetail};
use crate::nba::error::{Error, Result};
use crate::nba::frames::{cell_f64, cell_i64, cell_str, column_bool, ResultSet};
use crate::nba::params::*;
use crate::nba::players::Player;
use crate::nba::teams::{current_team, TeamCatalog};

pub const GAME_ID: &str = "GAME_ID";
pub const GAME_EVENT_ID: &str = "GAME_EVENT_ID";
pub const PERIOD: &str = "PERIOD";
pub const ACTION_TYPE: &str = "ACTION_TYPE";
pub const SHOT_TYPE: &str = "SHOT_TYPE";
pub const SHOT_ZONE_BASIC: &str = "SHOT_ZONE_BASIC";
pub const SHOT_DISTANCE: &str = "SHOT_DISTANCE";
pub const LOC_X: &str = "LOC_X";
pub const LOC_Y: &str = "LOC_Y";
pub const SHOT_MADE_FLAG: &str = "SHOT_MADE_FLAG";

/// One field goal attempt. Coordinates are in tenths of a foot with the hoop
/// at the origin, distance is in feet.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub game_id: String,
    pub game_event_id: i64,
    pub period: i64,
    pub action_type: String,
    pub shot_type: String,
    pub shot_zone_basic: String,
    pub shot_distance: f64,
    pub loc_x: f64,
    pub loc_y: f64,
    pub made: bool,
}

/// Shot filters. `team_id` defaults to every team the player appeared for;
/// [`ShotQuery::for_current_team`] narrows it to the latest one.
#[derive(Debug, Clone, Default)]
pub struct ShotQuery {
    pub season: Season,
    pub season_type: SeasonType,
    pub team_id: TeamID,
    pub last_n_games: LastNGames,
    pub opponent_team_id: OpponentTeamID,
    pub game_id: GameID,
}

impl ShotQuery {
    pub fn season(season: &str) -> Self {
        ShotQuery {
            season: Season::S(season.to_string()),
            ..Default::default()
        }
    }

    /// Resolves the player's current team through their profile and filters
    /// on it. One extra request.
    pub fn for_current_team(mut self, client: &dyn StatsClient, player: &Player, teams: &TeamCatalog) -> Result<Self> {
        self.team_id = current_team(client, player, teams)?.team_id();
        Ok(self)
    }

    fn endpoint(&self, player: &Player) -> ShotChartDetail {
        // FGA returns misses as well as makes
        ShotChartDetail {
            player_id: PlayerID(player.id),
            team_id: self.team_id.clone(),
            season: self.season.clone(),
            season_type: self.season_type.clone(),
            context_measure: ContextMeasure::FGA,
            last_n_games: self.last_n_games.clone(),
            opponent_team_id: self.opponent_team_id.clone(),
            game_id: self.game_id.clone(),
            league_id: LeagueID::NBA,
        }
    }
}

/// Result of a shot fetch: the whole set, or the set partitioned by outcome.
#[derive(Debug)]
pub enum ShotChart {
    All(DataFrame),
    Split { made: DataFrame, missed: DataFrame },
}

impl ShotChart {
    pub fn attempts(&self) -> usize {
        match self {
            ShotChart::All(df) => df.height(),
            ShotChart::Split { made, missed } => made.height() + missed.height(),
        }
    }

    /// The whole shot table; split results are stacked back, made first.
    pub fn into_frame(self) -> Result<DataFrame> {
        match self {
            ShotChart::All(df) => Ok(df),
            ShotChart::Split { made, missed } => Ok(made.vstack(&missed)?),
        }
    }
}

/// Fetches every attempt for `player` matching `query`. Each call is a fresh
/// request; provider failures are returned as-is.
pub fn fetch_shots(client: &dyn StatsClient, player: &Player, query: &ShotQuery, split: bool) -> Result<ShotChart> {
    let payload = query.endpoint(player).send_request(client)?;
    let shot_set = payload.result_set(ShotChartDetail::RESULT_SET)?;
    let records = shot_records(shot_set)?;
    debug!("{} attempts for {}", records.len(), player.full_name);
    let shots = shots_dataframe(&records)?;
    if split {
        let (made, missed) = split_made_missed(&shots)?;
        Ok(ShotChart::Split { made, missed })
    } else {
        Ok(ShotChart::All(shots))
    }
}

/// Partitions a shot table on `SHOT_MADE_FLAG` into (made, missed).
pub fn split_made_missed(shots: &DataFrame) -> Result<(DataFrame, DataFrame)> {
    let flags = column_bool(shots, SHOT_MADE_FLAG)?;
    let mask: BooleanChunked = flags.iter().copied().collect();
    let made = shots.filter(&mask)?;
    let missed = shots.filter(&!&mask)?;
    Ok((made, missed))
}

pub fn shot_records(shot_set: &ResultSet) -> Result<Vec<ShotRecord>> {
    let cols = [
        GAME_ID,
        GAME_EVENT_ID,
        PERIOD,
        ACTION_TYPE,
        SHOT_TYPE,
        SHOT_ZONE_BASIC,
        SHOT_DISTANCE,
        LOC_X,
        LOC_Y,
        SHOT_MADE_FLAG,
    ]
    .iter()
    .map(|h| shot_set.column(h))
    .collect::<Result<Vec<usize>>>()?;

    let mut records = Vec::with_capacity(shot_set.len());
    for row in &shot_set.row_set {
        let cell = |i: usize| {
            row.get(cols[i])
                .ok_or_else(|| Error::malformed(format!("shot row too short: {} cells", row.len())))
        };
        records.push(ShotRecord {
            game_id: cell_str(cell(0)?).unwrap_or_default(),
            game_event_id: cell_i64(cell(1)?, GAME_EVENT_ID)?,
            period: cell_i64(cell(2)?, PERIOD)?,
            action_type: cell_str(cell(3)?).unwrap_or_default(),
            shot_type: cell_str(cell(4)?).unwrap_or_default(),
            shot_zone_basic: cell_str(cell(5)?).unwrap_or_default(),
            shot_distance: cell_f64(cell(6)?, SHOT_DISTANCE)?,
            loc_x: cell_f64(cell(7)?, LOC_X)?,
            loc_y: cell_f64(cell(8)?, LOC_Y)?,
            made: made_flag(cell(9)?)?,
        });
    }
    Ok(records)
}

fn made_flag(v: &serde_json::Value) -> Result<bool> {
    if let Some(b) = v.as_bool() {
        return Ok(b);
    }
    match cell_i64(v, SHOT_MADE_FLAG)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(Error::malformed(format!("{} must be 0 or 1, got {}", SHOT_MADE_FLAG, other))),
    }
}

/// Shot table with a fixed column order; coordinates and distance as f64,
/// the made flag as bool.
pub fn shots_dataframe(records: &[ShotRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(GAME_ID, records.iter().map(|r| r.game_id.as_str()).collect::<Vec<&str>>()),
        Series::new(GAME_EVENT_ID, records.iter().map(|r| r.game_event_id).collect::<Vec<i64>>()),
        Series::new(PERIOD, records.iter().map(|r| r.period).collect::<Vec<i64>>()),
        Series::new(ACTION_TYPE, records.iter().map(|r| r.action_type.as_str()).collect::<Vec<&str>>()),
        Series::new(SHOT_TYPE, records.iter().map(|r| r.shot_type.as_str()).collect::<Vec<&str>>()),
        Series::new(SHOT_ZONE_BASIC, records.iter().map(|r| r.shot_zone_basic.as_str()).collect::<Vec<&str>>()),
        Series::new(SHOT_DISTANCE, records.iter().map(|r| r.shot_distance).collect::<Vec<f64>>()),
        Series::new(LOC_X, records.iter().map(|r| r.loc_x).collect::<Vec<f64>>()),
        Series::new(LOC_Y, records.iter().map(|r| r.loc_y).collect::<Vec<f64>>()),
        Series::new(SHOT_MADE_FLAG, records.iter().map(|r| r.made).collect::<Vec<bool>>()),
    ])?;
    Ok(df)
}
