#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use nbashots::nba::{Error, Result, StatsClient};
use serde_json::{json, Value};

pub const MOCK_BASE_URL: &str = "http://mock.stats";

pub enum Reply {
    Json(Value),
    Refused,
}

/// Canned replies keyed by endpoint path. Every request url is recorded.
#[derive(Default)]
pub struct MockClient {
    replies: HashMap<&'static str, Reply>,
    pub requests: RefCell<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reply(mut self, path: &'static str, reply: Reply) -> Self {
        self.replies.insert(path, reply);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl StatsClient for MockClient {
    fn base_url(&self) -> &str {
        MOCK_BASE_URL
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        self.requests.borrow_mut().push(url.to_string());
        let path = url
            .trim_start_matches(MOCK_BASE_URL)
            .trim_start_matches('/')
            .split('?')
            .next()
            .unwrap_or("");
        match self.replies.get(path) {
            Some(Reply::Json(v)) => Ok(v.clone()),
            Some(Reply::Refused) | None => Err(Error::Io {
                url: url.to_string(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            }),
        }
    }
}

/// Roster payload; each entry is (id, name, active).
pub fn roster(players: &[(i64, &str, bool)]) -> Value {
    let rows: Vec<Value> = players
        .iter()
        .map(|&(id, name, active)| {
            json!([id, name, name, if active { 1 } else { 0 }, "2009", "2024", name.to_lowercase(),
                   1610612745, "Houston", "Rockets", "HOU", "rockets", "Y", "N"])
        })
        .collect();
    json!({
        "resource": "commonallplayers",
        "parameters": { "LeagueID": "00", "Season": "2019-20", "IsOnlyCurrentSeason": 0 },
        "resultSets": [{
            "name": "CommonAllPlayers",
            "headers": ["PERSON_ID", "DISPLAY_LAST_COMMA_FIRST", "DISPLAY_FIRST_LAST", "ROSTERSTATUS",
                        "FROM_YEAR", "TO_YEAR", "PLAYERCODE", "TEAM_ID", "TEAM_CITY", "TEAM_NAME",
                        "TEAM_ABBREVIATION", "TEAM_CODE", "GAMES_PLAYED_FLAG", "OTHERLEAGUE_EXPERIENCE_CH"],
            "rowSet": rows
        }]
    })
}

/// Shot chart payload; each entry is (loc_x, loc_y, distance, made flag).
pub fn shot_chart(shots: &[(i64, i64, i64, i64)]) -> Value {
    let rows: Vec<Value> = shots
        .iter()
        .enumerate()
        .map(|(i, &(x, y, dist, flag))| {
            json!(["Shot Chart Detail", "0021900002", 10 + i as i64, 201935, "James Harden",
                   1610612745, "Houston Rockets", 1, 10, 5,
                   if flag == 1 { "Made Shot" } else { "Missed Shot" }, "Jump Shot", "2PT Field Goal",
                   "Mid-Range", "Center(C)", "8-16 ft.", dist, x, y, 1, flag, "20191024", "HOU", "MIL"])
        })
        .collect();
    json!({
        "resource": "shotchartdetail",
        "resultSets": [
            {
                "name": "Shot_Chart_Detail",
                "headers": ["GRID_TYPE", "GAME_ID", "GAME_EVENT_ID", "PLAYER_ID", "PLAYER_NAME", "TEAM_ID",
                            "TEAM_NAME", "PERIOD", "MINUTES_REMAINING", "SECONDS_REMAINING", "EVENT_TYPE",
                            "ACTION_TYPE", "SHOT_TYPE", "SHOT_ZONE_BASIC", "SHOT_ZONE_AREA", "SHOT_ZONE_RANGE",
                            "SHOT_DISTANCE", "LOC_X", "LOC_Y", "SHOT_ATTEMPTED_FLAG", "SHOT_MADE_FLAG",
                            "GAME_DATE", "HTM", "VTM"],
                "rowSet": rows
            },
            {
                "name": "LeagueAverages",
                "headers": ["GRID_TYPE", "SHOT_ZONE_BASIC", "SHOT_ZONE_AREA", "SHOT_ZONE_RANGE", "FGA", "FGM", "FG_PCT"],
                "rowSet": [["League Averages", "Mid-Range", "Center(C)", "8-16 ft.", 100, 41, 0.41]]
            }
        ]
    })
}

pub fn career() -> Value {
    json!({
        "resource": "playercareerstats",
        "resultSets": [{
            "name": "SeasonTotalsRegularSeason",
            "headers": ["PLAYER_ID", "SEASON_ID", "LEAGUE_ID", "TEAM_ID", "TEAM_ABBREVIATION", "PLAYER_AGE", "GP", "PTS", "FG_PCT"],
            "rowSet": [
                [201935, "2018-19", "00", 1610612745, "HOU", 29.0, 78, 2818, 0.442],
                [201935, "2019-20", "00", 1610612745, "HOU", 30.0, 68, 2335, 0.444],
                [201935, "2020-21", "00", 1610612745, "HOU", 31.0, 8, 198, 0.444],
                [201935, "2020-21", "00", 1610612751, "BKN", 31.0, 36, 897, 0.471]
            ]
        }]
    })
}

/// Profile payload; each entry is (season, team abbreviation, team id).
pub fn profile(seasons: &[(&str, &str, i64)]) -> Value {
    let rows: Vec<Value> = seasons
        .iter()
        .map(|&(season, abbreviation, team_id)| json!([201935, season, "00", team_id, abbreviation, 30.0, 70, 2000]))
        .collect();
    json!({
        "resource": "playerprofilev2",
        "resultSets": [
            {
                "name": "SeasonTotalsRegularSeason",
                "headers": ["PLAYER_ID", "SEASON_ID", "LEAGUE_ID", "TEAM_ID", "TEAM_ABBREVIATION", "PLAYER_AGE", "GP", "PTS"],
                "rowSet": rows
            },
            {
                "name": "CareerTotalsRegularSeason",
                "headers": ["PLAYER_ID", "LEAGUE_ID", "TEAM_ID", "GP", "PTS"],
                "rowSet": [[201935, "00", 0, 1000, 25000]]
            }
        ]
    })
}

/// Dashboard payload with every breakdown set.
pub fn dashboard() -> Value {
    let headers = json!(["PLAYER_ID", "PLAYER_NAME_LAST_FIRST", "SORT_ORDER", "GP", "G", "SHOT_TYPE",
                         "FGA_FREQUENCY", "FGM", "FGA", "FG_PCT"]);
    let set = |name: &str, rows: Value| json!({ "name": name, "headers": headers.clone(), "rowSet": rows });
    json!({
        "resource": "playerdashptshots",
        "resultSets": [
            set("OverallShooting", json!([[201935, "Harden, James", 1, 68, 68, "Overall", 1.0, 672, 1514, 0.444]])),
            set("GeneralShooting", json!([
                [201935, "Harden, James", 1, 68, 68, "Catch and Shoot", 0.05, 27, 75, 0.36],
                [201935, "Harden, James", 2, 68, 68, "Pull Ups", 0.55, 300, 833, 0.36],
                [201935, "Harden, James", 3, 68, 68, "Less than 10 ft", 0.3, 285, 451, 0.632]
            ])),
            set("ShotClockShooting", json!([[201935, "Harden, James", 1, 68, 68, "24-22", 0.02, 15, 30, 0.5]])),
            set("DribbleShooting", json!([[201935, "Harden, James", 1, 68, 68, "0 Dribbles", 0.1, 60, 150, 0.4]])),
            set("ClosestDefenderShooting", json!([[201935, "Harden, James", 1, 68, 68, "0-2 Feet - Very Tight", 0.1, 70, 150, 0.467]])),
            set("ClosestDefender10ftPlusShooting", json!([])),
            set("TouchTimeShooting", json!([[201935, "Harden, James", 1, 68, 68, "Touch 6+ Seconds", 0.6, 400, 900, 0.444]]))
        ]
    })
}
