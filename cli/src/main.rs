//! `gol` - command-line front end for the Game of Life service
//!
//! Every subcommand is turned into an [`ApiRequest`], handled against a
//! SQLite-backed [`BoardService`], and printed as the JSON body a web
//! binding would return. Non-2xx outcomes exit with a failure code.
//!
//! ```text
//! gol create --file glider.json
//! gol next <id>
//! gol states <id> 10
//! gol final <id>
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use game_of_life_core_rs::{
    handle, ApiRequest, ApiResponse, BoardService, ServiceConfig, SqliteBoardStore,
};

const DEFAULT_DATABASE: &str = "boards.db";

#[derive(Debug, Parser)]
#[command(name = "gol", version, about = "Conway's Game of Life boards, persisted between runs")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and environment)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a board from a JSON array of arrays of booleans
    Create {
        /// Read the matrix from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print a board without advancing it
    Show { id: Uuid },
    /// Advance one generation
    Next { id: Uuid },
    /// Advance up to COUNT generations, stopping early once stable
    States {
        id: Uuid,
        #[arg(allow_hyphen_values = true)]
        count: i64,
    },
    /// Run until stable, within the configured attempt budget
    Final { id: Uuid },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let Some(path) = &cli.config else {
        return ServiceConfig::from_env().context("Invalid environment configuration");
    };

    let mut config = ServiceConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config
        .apply_env_overrides(|key| std::env::var(key).ok())
        .context("Invalid environment configuration")?;
    Ok(config)
}

fn read_matrix(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read matrix from stdin")?;
            Ok(body)
        }
    }
}

fn build_request(command: &Command) -> Result<std::result::Result<ApiRequest, ApiResponse>> {
    let request = match command {
        Command::Create { file } => {
            let body = read_matrix(file.as_ref())?;
            return Ok(ApiRequest::route("POST", "/api/boards", Some(&body))
                .map_err(|e| e.into_response()));
        }
        Command::Show { id } => ApiRequest::GetBoard(*id),
        Command::Next { id } => ApiRequest::NextState(*id),
        Command::States { id, count } => ApiRequest::StatesAhead(*id, *count),
        Command::Final { id } => ApiRequest::FinalState(*id),
    };
    Ok(Ok(request))
}

fn print_response(response: &ApiResponse) -> Result<()> {
    if let Some(location) = &response.location {
        eprintln!("Location: {}", location);
    }
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let db_path = cli
        .db
        .clone()
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

    let store = SqliteBoardStore::open(&db_path)
        .with_context(|| format!("Failed to open board database at {}", db_path.display()))?;
    let mut service = BoardService::new(store, config.simulation.clone());

    let response = match build_request(&cli.command)? {
        Ok(request) => handle(&mut service, request, config.environment),
        Err(rejected) => rejected,
    };

    tracing::debug!(status = response.status.as_u16(), "request handled");
    print_response(&response)?;

    Ok(if response.status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    init_tracing();
    run(Cli::parse())
}
