use std::fmt;

use log::debug;
use polars::prelude::DataFrame;

use crate::nba::client::StatsClient;
use crate::nba::endpoints::{NBAEndpoint, PlayerDashPtShots};
use crate::nba::error::Result;
use crate::nba::frames::Payload;
use crate::nba::params::{LeagueID, PerMode, PlayerID};
use crate::nba::players::Player;
use crate::nba::shots::ShotQuery;

/// The ways the tracking dashboard slices a player's shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotBreakdown {
    Overall,
    ShotType,
    ShotClock,
    Dribbles,
    ClosestDefender,
    ClosestDefender10ftPlus,
    TouchTime,
}

impl ShotBreakdown {
    pub const ALL: [ShotBreakdown; 7] = [
        ShotBreakdown::Overall,
        ShotBreakdown::ShotType,
        ShotBreakdown::ShotClock,
        ShotBreakdown::Dribbles,
        ShotBreakdown::ClosestDefender,
        ShotBreakdown::ClosestDefender10ftPlus,
        ShotBreakdown::TouchTime,
    ];

    pub fn result_set(&self) -> &'static str {
        match self {
            ShotBreakdown::Overall => "OverallShooting",
            ShotBreakdown::ShotType => "GeneralShooting",
            ShotBreakdown::ShotClock => "ShotClockShooting",
            ShotBreakdown::Dribbles => "DribbleShooting",
            ShotBreakdown::ClosestDefender => "ClosestDefenderShooting",
            ShotBreakdown::ClosestDefender10ftPlus => "ClosestDefender10ftPlusShooting",
            ShotBreakdown::TouchTime => "TouchTimeShooting",
        }
    }
}

impl fmt::Display for ShotBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.result_set())
    }
}

/// One dashboard response. Breakdowns are pulled out of it without further
/// requests.
#[derive(Debug)]
pub struct ShotDashboard {
    payload: Payload,
}

impl ShotDashboard {
    pub fn breakdown(&self, breakdown: ShotBreakdown) -> Result<DataFrame> {
        self.payload.result_set(breakdown.result_set())?.to_dataframe()
    }
}

/// Fetches the shot dashboard for `player`. Team, season, season type, last
/// N games and opponent come from `query`; the game filter does not apply.
pub fn fetch_shot_dashboard(
    client: &dyn StatsClient,
    player: &Player,
    query: &ShotQuery,
    per_mode: PerMode,
) -> Result<ShotDashboard> {
    let endpoint = PlayerDashPtShots {
        team_id: query.team_id.clone(),
        player_id: PlayerID(player.id),
        last_n_games: query.last_n_games.clone(),
        season: query.season.clone(),
        season_type: query.season_type.clone(),
        opponent_team_id: query.opponent_team_id.clone(),
        per_mode,
        league_id: LeagueID::NBA,
    };
    let payload = endpoint.send_request(client)?;
    debug!("{} dashboard sets for {}", payload.result_sets.len(), player.full_name);
    Ok(ShotDashboard { payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn breakdowns_map_to_distinct_sets() {
        let names: HashSet<&str> = ShotBreakdown::ALL.iter().map(|b| b.result_set()).collect();
        assert_eq!(names.len(), ShotBreakdown::ALL.len());
        assert_eq!(ShotBreakdown::TouchTime.to_string(), "TouchTimeShooting");
    }
}
