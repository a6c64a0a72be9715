use polars::prelude::DataFrame;

use crate::nba::client::StatsClient;
use crate::nba::endpoints::{NBAEndpoint, PlayerCareerStats};
use crate::nba::error::Result;
use crate::nba::frames::{cell_i64, cell_str, ResultSet};
use crate::nba::params::{PerMode, PlayerID};
use crate::nba::players::Player;

/// Regular season totals, one row per season (and per team for traded
/// seasons), as totals or per game averages. Empty `seasons` / `team_ids`
/// mean no filtering on that column.
pub fn career_stats(
    client: &dyn StatsClient,
    player: &Player,
    per_mode: PerMode,
    seasons: &[String],
    team_ids: &[i64],
) -> Result<DataFrame> {
    let endpoint = PlayerCareerStats {
        per_mode,
        ..PlayerCareerStats::new(PlayerID(player.id))
    };
    let payload = endpoint.send_request(client)?;
    let mut totals = payload.into_result_set(PlayerCareerStats::RESULT_SET)?;
    filter_career(&mut totals, seasons, team_ids)?;
    totals.to_dataframe()
}

fn filter_career(totals: &mut ResultSet, seasons: &[String], team_ids: &[i64]) -> Result<()> {
    if !seasons.is_empty() {
        totals.retain_rows("SEASON_ID", |v| {
            cell_str(v).map(|s| seasons.contains(&s)).unwrap_or(false)
        })?;
    }
    if !team_ids.is_empty() {
        totals.retain_rows("TEAM_ID", |v| {
            cell_i64(v, "TEAM_ID").map(|id| team_ids.contains(&id)).unwrap_or(false)
        })?;
    }
    Ok(())
}
