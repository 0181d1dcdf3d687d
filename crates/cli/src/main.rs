use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use dojade_core::alerts::{AlertBoard, REFRESH_INTERVAL_SECS};
use dojade_core::api::ApiClient;
use dojade_core::cache::CacheStore;
use dojade_core::config::ClientConfig;
use dojade_core::planner::TripPlanner;
use dojade_core::session::Session;
use dojade_core::transit::identifiers::{AlertId, LineRef, StopCode};
use dojade_core::transit::models::{AlertCategory, StopGroup, VoteDirection};
use dojade_core::transit::search::DEFAULT_SUGGESTION_LIMIT;
use dojade_core::transit::time::ClockTime;

mod output;

/// How many route alternatives to print unless --all is given.
const DEFAULT_ROUTE_COUNT: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "dojade",
    version,
    about = "Terminal trip planner for the Poznań public transit network"
)]
struct Args {
    /// Backend API root (overrides DOJADE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Cache directory (overrides DOJADE_CACHE_DIR)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stop groups, or search them by name
    Stops {
        /// Name fragment to search for; lists everything when omitted
        query: Option<String>,

        /// Maximum number of matches to print
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Plan routes between two stop groups
    Plan {
        /// Origin stop group, by code or name
        from: String,

        /// Destination stop group, by code or name
        to: String,

        /// Depart at this time (HH:MM) instead of now
        #[arg(long)]
        at: Option<ClockTime>,

        /// Print every alternative instead of the best few
        #[arg(long)]
        all: bool,
    },

    /// Remaining departures from a physical stop today
    Departures {
        /// Stop code, e.g. AWF73
        stop: String,
    },

    /// Find the stop group closest to a coordinate
    Nearest { lat: f64, lon: f64 },

    /// Show the live alert board
    Alerts {
        /// Keep the board on screen, refreshing on an interval
        #[arg(long)]
        watch: bool,

        /// Refresh interval in seconds
        #[arg(long, default_value_t = REFRESH_INTERVAL_SECS)]
        interval: u64,
    },

    /// Report an incident at a coordinate
    Report {
        lat: f64,
        lon: f64,

        /// One of: inspector, malfunction, accident, delay
        category: AlertCategory,

        /// Line the incident is pinned to
        #[arg(long)]
        line: Option<String>,
    },

    /// Vote on an existing alert
    Vote {
        id: String,

        /// up or down
        direction: VoteDirection,
    },

    /// Log in to an account
    Login { email: String },

    /// Create an account and log into it
    Register { email: String, username: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.api_url {
        config.base_url = url;
    }
    if let Some(dir) = args.cache_dir {
        config.cache_dir = dir;
    }
    let api = ApiClient::new(&config)?;
    tracing::debug!("backend: {}", config.base_url);

    match args.command {
        Command::Stops { query, limit } => {
            let planner = planner(api, &config)?;
            let groups = match &query {
                Some(query) => planner.suggest(query, limit).await?,
                None => planner.stop_groups().await?,
            };
            if groups.is_empty() {
                println!("No stop groups matched.");
            }
            for group in &groups {
                println!("{}", output::group_line(group));
            }
        }

        Command::Plan { from, to, at, all } => {
            let planner = planner(api, &config)?;
            let origin = resolve_group(&planner, &from).await?;
            let destination = resolve_group(&planner, &to).await?;
            println!("{} -> {}", origin.group_name, destination.group_name);

            let routes = planner
                .plan(&origin.group_code, &destination.group_code, at)
                .await?;
            if routes.is_empty() {
                println!("No routes found.");
                return Ok(());
            }
            let shown = if all {
                routes.len()
            } else {
                routes.len().min(DEFAULT_ROUTE_COUNT)
            };
            for route in &routes[..shown] {
                println!();
                println!("{}", output::route_block(route));
            }
        }

        Command::Departures { stop } => {
            let planner = planner(api, &config)?;
            let entries = planner.departures(&StopCode::new(stop.as_str())).await?;
            if entries.is_empty() {
                println!("No departures left today.");
            }
            for entry in &entries {
                println!("{}", output::timetable_line(entry));
            }
        }

        Command::Nearest { lat, lon } => {
            let planner = planner(api, &config)?;
            let (group, distance) = planner.nearest(lat, lon).await?;
            println!("{}  ({distance:.0} m away)", output::group_line(&group));
        }

        Command::Alerts { watch, interval } => {
            let mut board = AlertBoard::new(api);
            board.refresh().await?;
            print_board(&board);

            if watch {
                loop {
                    tokio::time::sleep(Duration::from_secs(interval)).await;
                    board.refresh().await?;
                    println!();
                    print_board(&board);
                }
            }
        }

        Command::Report {
            lat,
            lon,
            category,
            line,
        } => {
            let mut board = AlertBoard::new(api);
            let line = line.map(LineRef::new);
            board.report(lat, lon, line.as_ref(), category).await?;
            println!("Report filed: {} {}", category.glyph(), category.label());
        }

        Command::Vote { id, direction } => {
            let mut board = AlertBoard::new(api);
            board.vote(&AlertId::new(id.as_str()), direction).await?;
            println!("Vote cast: {direction}");
        }

        Command::Login { email } => {
            let password = read_password("Password: ")?;
            let mut session = Session::new(api);
            session.login(&email, &password).await?;
            println!("Logged in as {email}.");
        }

        Command::Register { email, username } => {
            let password = read_password("Password: ")?;
            let mut session = Session::new(api);
            session.register(&email, &password, &username).await?;
            println!("Account created, logged in as {username}.");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn planner(api: ApiClient, config: &ClientConfig) -> Result<TripPlanner> {
    let cache = CacheStore::new(config.cache_dir.clone(), config.cache_ttl)
        .context("Failed to open the cache directory")?;
    Ok(TripPlanner::new(api, cache))
}

/// Resolve rider input to a stop group: exact code match first, then the
/// best name suggestion.
async fn resolve_group(planner: &TripPlanner, input: &str) -> Result<StopGroup> {
    let groups = planner.stop_groups().await?;
    if let Some(group) = groups
        .iter()
        .find(|group| group.group_code.as_str().eq_ignore_ascii_case(input))
    {
        return Ok(group.clone());
    }

    planner
        .suggest(input, 1)
        .await?
        .into_iter()
        .next()
        .with_context(|| format!("No stop group matches {input:?}"))
}

fn print_board(board: &AlertBoard) {
    let alerts = board.alerts();
    if alerts.is_empty() {
        println!("No active alerts.");
        return;
    }
    let now = Utc::now();
    for alert in alerts {
        println!("{}", output::alert_line(alert, now));
    }
}

fn read_password(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim_end_matches('\n').trim_end_matches('\r').to_owned())
}
