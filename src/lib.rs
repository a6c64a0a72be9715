//! NBA player lookup, shot chart retrieval and shot chart plotting on top of
//! the stats.nba.com API.
//!
//! ```no_run
//! use nbashots::nba::endpoints::CommonAllPlayers;
//! use nbashots::nba::{fetch_shots, HttpStatsClient, PlayerCatalog, ShotQuery};
//!
//! let client = HttpStatsClient::default();
//! let catalog = PlayerCatalog::fetch(&client, &CommonAllPlayers::default(), true)?;
//! let harden = catalog.get("James Harden")?;
//! let shots = fetch_shots(&client, harden, &ShotQuery::season("2019-20"), true)?;
//! println!("{} attempts", shots.attempts());
//! # Ok::<(), nbashots::nba::Error>(())
//! ```

pub mod nba;
pub mod plot;
