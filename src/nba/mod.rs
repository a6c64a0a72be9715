pub mod career;
pub mod client;
pub mod dashboard;
pub mod endpoints;
pub mod error;
pub mod frames;
pub mod params;
pub mod players;
pub mod shots;
pub mod teams;

pub use client::{ClientConfig, HttpStatsClient, StatsClient};
pub use error::{Error, Result};
pub use players::{Player, PlayerCatalog};
pub use dashboard::{fetch_shot_dashboard, ShotBreakdown, ShotDashboard};
pub use shots::{fetch_shots, split_made_missed, ShotChart, ShotQuery, ShotRecord};
pub use teams::{current_team, Team, TeamCatalog};
