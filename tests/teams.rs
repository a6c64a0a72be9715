mod common;

use common::{dashboard, profile, MockClient, Reply};
use nbashots::nba::params::{PerMode, TeamID};
use nbashots::nba::{
    current_team, fetch_shot_dashboard, fetch_shots, Error, Player, ShotBreakdown, ShotQuery, TeamCatalog,
};

fn harden() -> Player {
    Player::new(201935, "James Harden", true)
}

#[test]
fn current_team_is_the_latest_season() {
    let client = MockClient::new().reply(
        "playerprofilev2",
        Reply::Json(profile(&[("2018-19", "HOU", 1610612745), ("2019-20", "HOU", 1610612745), ("2020-21", "BKN", 1610612751)])),
    );
    let teams = TeamCatalog::nba();
    let team = current_team(&client, &harden(), &teams).unwrap();
    assert_eq!(team.abbreviation, "BKN");
    assert!(client.requests.borrow()[0].contains("playerprofilev2?"));
}

#[test]
fn traded_season_total_row_is_skipped() {
    let client = MockClient::new().reply(
        "playerprofilev2",
        Reply::Json(profile(&[("2020-21", "HOU", 1610612745), ("2020-21", "BKN", 1610612751), ("2020-21", "TOT", 0)])),
    );
    let teams = TeamCatalog::nba();
    assert_eq!(current_team(&client, &harden(), &teams).unwrap().id, 1610612751);
}

#[test]
fn profile_without_seasons_has_no_current_team() {
    let client = MockClient::new().reply("playerprofilev2", Reply::Json(profile(&[])));
    let err = current_team(&client, &harden(), &TeamCatalog::nba()).unwrap_err();
    assert!(matches!(err, Error::TeamNotFound(_)));
}

#[test]
fn shot_query_follows_the_current_team() {
    let client = MockClient::new()
        .reply("playerprofilev2", Reply::Json(profile(&[("2019-20", "HOU", 1610612745)])))
        .reply("shotchartdetail", Reply::Json(common::shot_chart(&[(0, 0, 0, 1)])));
    let teams = TeamCatalog::nba();
    let query = ShotQuery::season("2019-20")
        .for_current_team(&client, &harden(), &teams)
        .unwrap();
    assert_eq!(query.team_id, TeamID::ID(1610612745));
    fetch_shots(&client, &harden(), &query, false).unwrap();
    let requests = client.requests.borrow();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].contains("&TeamID=1610612745"));
}

#[test]
fn dashboard_breakdowns_come_from_one_request() {
    let client = MockClient::new().reply("playerdashptshots", Reply::Json(dashboard()));
    let dash = fetch_shot_dashboard(&client, &harden(), &ShotQuery::season("2019-20"), PerMode::PerGame).unwrap();
    for breakdown in ShotBreakdown::ALL {
        assert!(dash.breakdown(breakdown).is_ok(), "{} missing", breakdown);
    }
    let per_type = dash.breakdown(ShotBreakdown::ShotType).unwrap();
    assert_eq!(per_type.height(), 3);
    assert_eq!(per_type.column("FGA").unwrap().i64().unwrap().get(1), Some(833));
    assert_eq!(dash.breakdown(ShotBreakdown::ClosestDefender10ftPlus).unwrap().height(), 0);
    assert_eq!(client.request_count(), 1);
    assert!(client.requests.borrow()[0].contains("PerMode=PerGame"));
}

#[test]
fn missing_breakdown_is_malformed() {
    let client = MockClient::new().reply(
        "playerdashptshots",
        Reply::Json(serde_json::json!({ "resultSets": [] })),
    );
    let dash = fetch_shot_dashboard(&client, &harden(), &ShotQuery::default(), PerMode::Totals).unwrap();
    assert!(matches!(dash.breakdown(ShotBreakdown::Overall), Err(Error::Malformed(_))));
}

#[test]
fn dashboard_transport_error_propagates() {
    let client = MockClient::new().reply("playerdashptshots", Reply::Refused);
    let err = fetch_shot_dashboard(&client, &harden(), &ShotQuery::default(), PerMode::Totals).unwrap_err();
    assert!(err.is_upstream());
}
