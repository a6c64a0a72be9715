use std::collections::HashMap;
use std::time::Instant;

use log::debug;
use polars::prelude::DataFrame;

use crate::nba::client::StatsClient;
use crate::nba::error::Result;
use crate::nba::frames::Payload;
use crate::nba::params::*;

pub trait NBAEndpoint {
    /// Path under the stats base url, e.g. `shotchartdetail`.
    fn path(&self) -> &'static str;
    /// Query params as `Key=Value` fragments.
    fn params(&self) -> Vec<String>;

    fn url(&self, base_url: &str) -> String {
        format!("{}/{}?{}", base_url, self.path(), self.params().join("&"))
    }

    fn send_request(&self, client: &dyn StatsClient) -> Result<Payload> {
        let endpoint_url = self.url(client.base_url());
        let json = client.get_json(&endpoint_url)?;
        Payload::from_value(json)
    }

    /// Every result set of the response as a dataframe, keyed by set name.
    fn load_dataframes(&self, client: &dyn StatsClient) -> Result<HashMap<String, DataFrame>> {
        let payload = self.send_request(client)?;
        let load_start = Instant::now();
        let mut stats_dataframes: HashMap<String, DataFrame> = HashMap::new();
        for data_set in &payload.result_sets {
            stats_dataframes.insert(data_set.name.clone(), data_set.to_dataframe()?);
        }
        debug!("dataframe loading took {:?}", load_start.elapsed());
        Ok(stats_dataframes)
    }
}

/// Master roster, current and former players.
pub struct CommonAllPlayers {
    pub league_id: LeagueID,
    pub season: Season,
    pub only_current_season: OnlyCurrentSeason,
}

pub struct ShotChartDetail {
    pub player_id: PlayerID,
    pub team_id: TeamID,
    pub season: Season,
    pub season_type: SeasonType,
    pub context_measure: ContextMeasure,
    pub last_n_games: LastNGames,
    pub opponent_team_id: OpponentTeamID,
    pub game_id: GameID,
    pub league_id: LeagueID,
}

pub struct PlayerCareerStats {
    pub player_id: PlayerID,
    pub per_mode: PerMode,
    pub league_id: LeagueID,
}

/// Career profile; only its season totals are read, to find the player's
/// latest team.
pub struct PlayerProfileV2 {
    pub player_id: PlayerID,
    pub per_mode: PerMode,
    pub league_id: LeagueID,
}

/// Tracking shot breakdowns, one result set per breakdown.
pub struct PlayerDashPtShots {
    pub team_id: TeamID,
    pub player_id: PlayerID,
    pub last_n_games: LastNGames,
    pub season: Season,
    pub season_type: SeasonType,
    pub opponent_team_id: OpponentTeamID,
    pub per_mode: PerMode,
    pub league_id: LeagueID,
}

impl CommonAllPlayers {
    pub const RESULT_SET: &'static str = "CommonAllPlayers";

    pub fn new(league_id: LeagueID, season: Season) -> Self {
        CommonAllPlayers {
            league_id,
            season,
            only_current_season: OnlyCurrentSeason::No,
        }
    }
}

impl Default for CommonAllPlayers {
    fn default() -> Self {
        CommonAllPlayers::new(Default::default(), Default::default())
    }
}

impl ShotChartDetail {
    pub const RESULT_SET: &'static str = "Shot_Chart_Detail";
}

impl PlayerCareerStats {
    pub const RESULT_SET: &'static str = "SeasonTotalsRegularSeason";

    pub fn new(player_id: PlayerID) -> Self {
        PlayerCareerStats {
            player_id,
            per_mode: Default::default(),
            league_id: Default::default(),
        }
    }
}

impl PlayerProfileV2 {
    pub const RESULT_SET: &'static str = "SeasonTotalsRegularSeason";

    pub fn new(player_id: PlayerID) -> Self {
        PlayerProfileV2 {
            player_id,
            per_mode: PerMode::Totals,
            league_id: Default::default(),
        }
    }
}

impl NBAEndpoint for CommonAllPlayers {
    fn path(&self) -> &'static str {
        "commonallplayers"
    }

    fn params(&self) -> Vec<String> {
        vec![
            self.only_current_season.to_string(),
            self.league_id.to_string(),
            self.season.to_string(),
        ]
    }
}

impl NBAEndpoint for ShotChartDetail {
    fn path(&self) -> &'static str {
        "shotchartdetail"
    }

    // The endpoint rejects requests that leave out any of its params, so the
    // ones we never filter on are sent empty.
    fn params(&self) -> Vec<String> {
        vec![
            self.context_measure.to_string(),
            "DateFrom=".to_string(),
            "DateTo=".to_string(),
            self.game_id.to_string(),
            "GameSegment=".to_string(),
            self.last_n_games.to_string(),
            self.league_id.to_string(),
            "Location=".to_string(),
            "Month=0".to_string(),
            self.opponent_team_id.to_string(),
            "Outcome=".to_string(),
            "Period=0".to_string(),
            self.player_id.to_string(),
            "PlayerPosition=".to_string(),
            "RookieYear=".to_string(),
            self.season.to_string(),
            "SeasonSegment=".to_string(),
            self.season_type.to_string(),
            self.team_id.to_string(),
            "VsConference=".to_string(),
            "VsDivision=".to_string(),
        ]
    }
}

impl NBAEndpoint for PlayerCareerStats {
    fn path(&self) -> &'static str {
        "playercareerstats"
    }

    fn params(&self) -> Vec<String> {
        vec![
            self.per_mode.to_string(),
            self.player_id.to_string(),
            self.league_id.to_string(),
        ]
    }
}

impl NBAEndpoint for PlayerProfileV2 {
    fn path(&self) -> &'static str {
        "playerprofilev2"
    }

    fn params(&self) -> Vec<String> {
        vec![
            self.league_id.to_string(),
            self.per_mode.to_string(),
            self.player_id.to_string(),
        ]
    }
}

impl NBAEndpoint for PlayerDashPtShots {
    fn path(&self) -> &'static str {
        "playerdashptshots"
    }

    fn params(&self) -> Vec<String> {
        vec![
            "DateFrom=".to_string(),
            "DateTo=".to_string(),
            "GameSegment=".to_string(),
            self.last_n_games.to_string(),
            self.league_id.to_string(),
            "Location=".to_string(),
            "Month=0".to_string(),
            self.opponent_team_id.to_string(),
            "Outcome=".to_string(),
            self.per_mode.to_string(),
            "Period=0".to_string(),
            self.player_id.to_string(),
            self.season.to_string(),
            "SeasonSegment=".to_string(),
            self.season_type.to_string(),
            self.team_id.to_string(),
            "VsConference=".to_string(),
            "VsDivision=".to_string(),
        ]
    }
}
