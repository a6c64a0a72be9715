use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgEnum, Args, Parser, Subcommand};
use log::info;
use tabled::{Table, Tabled};

use nbashots::nba::career::career_stats;
use nbashots::nba::endpoints::CommonAllPlayers;
use nbashots::nba::params::{GameID, LastNGames, OnlyCurrentSeason, OpponentTeamID, PerMode, Season, SeasonType};
use nbashots::nba::{
    fetch_shot_dashboard, fetch_shots, ClientConfig, HttpStatsClient, Player, PlayerCatalog, ShotBreakdown,
    ShotChart, ShotQuery, StatsClient, TeamCatalog,
};
use nbashots::plot::{
    fg_pct_chart, hexbin_chart, scatter_chart, DistanceOptions, HexbinOptions, ScatterStyle,
    ShotColumns,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct NBACli {
    /// Stats API base url
    #[clap(long, default_value = nbashots::nba::client::NBA_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds, unset leaves the HTTP client default
    #[clap(long)]
    timeout: Option<u64>,

    #[clap(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct ShotArgs {
    /// Full player name, or a unique part of it
    player: String,

    /// Season label such as 2019-20, defaults to the current season
    #[clap(short, long)]
    season: Option<String>,

    #[clap(arg_enum, long, default_value = "regular")]
    season_type: SeasonKind,

    /// Only shots taken for the player's current team
    #[clap(long, conflicts_with = "team")]
    current_team: bool,

    /// Only shots taken for this team (abbreviation, e.g. HOU)
    #[clap(long)]
    team: Option<String>,

    /// Only shots against this team (abbreviation)
    #[clap(long)]
    opponent: Option<String>,

    #[clap(long, default_value = "0")]
    last_n_games: i32,

    #[clap(long)]
    game_id: Option<String>,
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum SeasonKind {
    Regular,
    Playoffs,
    PreSeason,
    AllStar,
}

impl From<SeasonKind> for SeasonType {
    fn from(kind: SeasonKind) -> Self {
        match kind {
            SeasonKind::Regular => SeasonType::Regular,
            SeasonKind::Playoffs => SeasonType::Playoffs,
            SeasonKind::PreSeason => SeasonType::PreSeason,
            SeasonKind::AllStar => SeasonType::AllStar,
        }
    }
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Breakdown {
    Overall,
    ShotType,
    ShotClock,
    Dribbles,
    ClosestDefender,
    ClosestDefender10ftPlus,
    TouchTime,
}

impl From<Breakdown> for ShotBreakdown {
    fn from(b: Breakdown) -> Self {
        match b {
            Breakdown::Overall => ShotBreakdown::Overall,
            Breakdown::ShotType => ShotBreakdown::ShotType,
            Breakdown::ShotClock => ShotBreakdown::ShotClock,
            Breakdown::Dribbles => ShotBreakdown::Dribbles,
            Breakdown::ClosestDefender => ShotBreakdown::ClosestDefender,
            Breakdown::ClosestDefender10ftPlus => ShotBreakdown::ClosestDefender10ftPlus,
            Breakdown::TouchTime => ShotBreakdown::TouchTime,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List players, optionally filtered by a name keyword
    Players {
        #[clap(short, long)]
        keyword: Option<String>,

        /// Only currently rostered players
        #[clap(short, long)]
        active: bool,

        /// Ask the provider for this season's roster only
        #[clap(long)]
        current_season: bool,
    },
    /// List the NBA franchises
    Teams,
    /// Fetch a player's shot attempts and summarize them
    Shots {
        #[clap(flatten)]
        shot_args: ShotArgs,

        /// Split attempts into made and missed tables
        #[clap(long)]
        split: bool,

        /// Print the shot rows, not just the summary
        #[clap(long)]
        rows: bool,
    },
    /// Hexbin shot density chart
    Hexbin {
        #[clap(flatten)]
        shot_args: ShotArgs,

        #[clap(short, long, default_value = "hexbin.png")]
        output: PathBuf,

        #[clap(long, default_value = "30")]
        grid_x: usize,

        #[clap(long, default_value = "20")]
        grid_y: usize,

        #[clap(long)]
        open: bool,
    },
    /// Made/missed scatter chart
    Scatter {
        #[clap(flatten)]
        shot_args: ShotArgs,

        #[clap(short, long, default_value = "scatter.png")]
        output: PathBuf,

        /// Leave misses off the chart
        #[clap(long)]
        made_only: bool,

        #[clap(long)]
        open: bool,
    },
    /// Field goal percentage by distance
    FgPct {
        #[clap(flatten)]
        shot_args: ShotArgs,

        #[clap(short, long, default_value = "fg_pct.png")]
        output: PathBuf,

        /// Bucket width in feet
        #[clap(long, default_value = "1")]
        bucket: f64,

        #[clap(long, default_value = "1")]
        min_attempts: usize,

        #[clap(long)]
        open: bool,
    },
    /// Tracking shot breakdown (per game)
    Dashboard {
        #[clap(flatten)]
        shot_args: ShotArgs,

        #[clap(arg_enum, long, default_value = "overall")]
        breakdown: Breakdown,
    },
    /// Regular season career totals
    Career {
        player: String,

        /// Per game averages instead of totals
        #[clap(long)]
        per_game: bool,

        #[clap(long)]
        season: Vec<String>,

        #[clap(long)]
        team_id: Vec<i64>,
    },
}

#[derive(Tabled)]
struct PlayerRow {
    id: i64,
    name: String,
    active: bool,
    team: String,
    years: String,
}

#[derive(Tabled)]
struct TeamRow {
    id: i64,
    abbreviation: String,
    name: String,
}

#[derive(Tabled)]
struct ShotSummary {
    attempts: usize,
    made: usize,
    missed: usize,
    fg_pct: String,
}

fn load_catalog(client: &dyn StatsClient, active_only: bool) -> Result<PlayerCatalog> {
    load_roster(client, &CommonAllPlayers::default(), active_only)
}

fn load_roster(client: &dyn StatsClient, roster: &CommonAllPlayers, active_only: bool) -> Result<PlayerCatalog> {
    let catalog = PlayerCatalog::fetch(client, roster, active_only)
        .context("failed to load the player roster")?;
    info!("{} players in catalog", catalog.len());
    Ok(catalog)
}

fn resolve_player<'a>(catalog: &'a PlayerCatalog, name: &str) -> Result<&'a Player> {
    if let Ok(player) = catalog.get(name) {
        return Ok(player);
    }
    let found = catalog.search(name);
    match found.as_slice() {
        [player] => Ok(*player),
        [] => Err(nbashots::nba::Error::PlayerNotFound(name.to_string()).into()),
        many => {
            let names: Vec<&str> = many.iter().take(10).map(|p| p.full_name.as_str()).collect();
            bail!("{} matches {} players: {}", name, many.len(), names.join(", "))
        }
    }
}

fn shot_query(client: &dyn StatsClient, player: &Player, args: &ShotArgs) -> Result<ShotQuery> {
    let teams = TeamCatalog::nba();
    let season = match &args.season {
        Some(s) => s.parse::<Season>()?,
        None => Season::default(),
    };
    let game_id = match &args.game_id {
        Some(id) => id.parse::<GameID>()?,
        None => GameID::All,
    };
    let mut query = ShotQuery {
        season,
        season_type: args.season_type.into(),
        last_n_games: LastNGames::N(args.last_n_games),
        game_id,
        ..Default::default()
    };
    if let Some(team) = &args.team {
        query.team_id = teams.get(team)?.team_id();
    }
    if let Some(opponent) = &args.opponent {
        query.opponent_team_id = OpponentTeamID(teams.get(opponent)?.team_id());
    }
    if args.current_team {
        query = query
            .for_current_team(client, player, &teams)
            .with_context(|| format!("failed to find the current team of {}", player.full_name))?;
    }
    Ok(query)
}

fn load_shot_columns(client: &dyn StatsClient, args: &ShotArgs) -> Result<ShotColumns> {
    let catalog = load_catalog(client, false)?;
    let player = resolve_player(&catalog, &args.player)?;
    let query = shot_query(client, player, args)?;
    let shots = fetch_shots(client, player, &query, false)?.into_frame()?;
    let columns = ShotColumns::from_frame(&shots)?;
    if columns.is_empty() {
        bail!("no shots found for {}", player.full_name);
    }
    info!("{} attempts for {}", columns.len(), player.full_name);
    Ok(columns)
}

fn open_chart(path: &Path, open: bool) -> Result<()> {
    println!("{}", path.display());
    if open {
        webbrowser::open(&path.to_string_lossy()).context("failed to open chart")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = NBACli::parse();
    let client = HttpStatsClient::new(ClientConfig {
        base_url: args.base_url,
        timeout: args.timeout.map(Duration::from_secs),
    });

    match args.cmd {
        Commands::Players { keyword, active, current_season } => {
            let roster = CommonAllPlayers {
                only_current_season: if current_season { OnlyCurrentSeason::Yes } else { OnlyCurrentSeason::No },
                ..Default::default()
            };
            let catalog = load_roster(&client, &roster, active)?;
            let mut players: Vec<&Player> = match &keyword {
                Some(k) => catalog.search(k),
                None => catalog.iter().collect(),
            };
            players.sort_by(|a, b| a.full_name.cmp(&b.full_name));
            let rows: Vec<PlayerRow> = players
                .iter()
                .map(|p| PlayerRow {
                    id: p.id,
                    name: p.full_name.clone(),
                    active: p.is_active,
                    team: p.team_abbreviation.clone().unwrap_or_default(),
                    years: p.years(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Commands::Teams => {
            let rows: Vec<TeamRow> = TeamCatalog::nba()
                .iter()
                .map(|t| TeamRow {
                    id: t.id,
                    abbreviation: t.abbreviation.clone(),
                    name: t.full_name.clone(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Commands::Shots { shot_args, split, rows } => {
            let catalog = load_catalog(&client, false)?;
            let player = resolve_player(&catalog, &shot_args.player)?;
            let query = shot_query(&client, player, &shot_args)?;
            let shots = fetch_shots(&client, player, &query, split)
                .with_context(|| format!("failed to fetch shots for {}", player.full_name))?;
            let (made, missed) = match &shots {
                ShotChart::All(df) => {
                    let cols = ShotColumns::from_frame(df)?;
                    let made = cols.made.iter().filter(|&&m| m).count();
                    (made, cols.len() - made)
                }
                ShotChart::Split { made, missed } => (made.height(), missed.height()),
            };
            let attempts = made + missed;
            let fg_pct = if attempts == 0 {
                "-".to_string()
            } else {
                format!("{:.1}", 100.0 * made as f64 / attempts as f64)
            };
            println!("{}", player.full_name);
            println!("{}", Table::new(vec![ShotSummary { attempts, made, missed, fg_pct }]));
            if rows {
                match shots {
                    ShotChart::All(df) => println!("{}", df),
                    ShotChart::Split { made, missed } => println!("made\n{}\nmissed\n{}", made, missed),
                }
            }
        }
        Commands::Hexbin { shot_args, output, grid_x, grid_y, open } => {
            let cols = load_shot_columns(&client, &shot_args)?;
            let options = HexbinOptions {
                gridsize: (grid_x, grid_y),
                ..Default::default()
            };
            hexbin_chart(&cols.x, &cols.y, &output, &options)?;
            open_chart(&output, open)?;
        }
        Commands::Scatter { shot_args, output, made_only, open } => {
            let cols = load_shot_columns(&client, &shot_args)?;
            let (made, missed) = cols.by_outcome();
            let missed = if made_only {
                None
            } else {
                Some((missed.0.as_slice(), missed.1.as_slice()))
            };
            scatter_chart((made.0.as_slice(), made.1.as_slice()), missed, &output, &ScatterStyle::default())?;
            open_chart(&output, open)?;
        }
        Commands::FgPct { shot_args, output, bucket, min_attempts, open } => {
            let cols = load_shot_columns(&client, &shot_args)?;
            let options = DistanceOptions {
                bucket_width: bucket,
                min_attempts,
                title: Some(shot_args.player.clone()),
                ..Default::default()
            };
            fg_pct_chart(&cols.distance, &cols.made, &output, &options)?;
            open_chart(&output, open)?;
        }
        Commands::Dashboard { shot_args, breakdown } => {
            let catalog = load_catalog(&client, false)?;
            let player = resolve_player(&catalog, &shot_args.player)?;
            let query = shot_query(&client, player, &shot_args)?;
            let dashboard = fetch_shot_dashboard(&client, player, &query, PerMode::PerGame)
                .with_context(|| format!("failed to fetch the shot dashboard for {}", player.full_name))?;
            let breakdown = ShotBreakdown::from(breakdown);
            println!("{} ({})\n{}", player.full_name, breakdown, dashboard.breakdown(breakdown)?);
        }
        Commands::Career { player, per_game, season, team_id } => {
            let catalog = load_catalog(&client, false)?;
            let player = resolve_player(&catalog, &player)?;
            let per_mode = if per_game { PerMode::PerGame } else { PerMode::Totals };
            let totals = career_stats(&client, player, per_mode, &season, &team_id)
                .with_context(|| format!("failed to fetch career stats for {}", player.full_name))?;
            println!("{}\n{}", player.full_name, totals);
        }
    }
    Ok(())
}
