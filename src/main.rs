// src/main.rs

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pokehub::application::commands::*;
use pokehub::application::{AppState, ErrorResponse, Shell};
use pokehub::config::AppConfig;
use pokehub::db::{
    create_connection_pool, get_connection, get_database_path, initialize_database,
    verify_database_integrity,
};
use pokehub::domain::CollectionKind;
use pokehub::integrations::{CreatureApi, PokeApiClient};
use pokehub::repositories::{KeyValueStorage, MemoryStorage, SqliteStorage};

/// PokeHub - search, browse and collect creatures from PokeAPI
#[derive(Parser)]
#[command(name = "pokehub")]
#[command(version)]
struct Cli {
    /// Directory for the local storage database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep collections in memory only for this run
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Base URL of the creature API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to the interactive shell
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a creature by name or id
    Search {
        query: Vec<String>,

        /// Show the shiny sprite when available
        #[arg(long)]
        shiny: bool,
    },

    /// Look up a random creature
    Random {
        #[arg(long)]
        shiny: bool,
    },

    /// List creatures from the index
    Browse {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Recent searches
    History {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// Favorite creatures
    Favorites {
        #[command(subcommand)]
        action: Option<FavoriteAction>,
    },

    /// Your team (up to 6)
    Team {
        #[command(subcommand)]
        action: Option<TeamAction>,
    },

    /// Side-by-side comparison (only kept within a shell session)
    Compare,

    /// Interactive session
    Shell,
}

#[derive(Subcommand)]
enum ListAction {
    List,
    Clear,
}

#[derive(Subcommand)]
enum FavoriteAction {
    List,
    /// Search for a creature and toggle it in favorites
    Toggle { query: Vec<String> },
    Clear,
}

#[derive(Subcommand)]
enum TeamAction {
    List,
    /// Search for a creature and add it to the team
    Add { query: Vec<String> },
    Remove { id: u32 },
    Clear,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;

    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    config.ephemeral |= cli.ephemeral;

    Ok(config)
}

fn open_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn KeyValueStorage>> {
    if config.ephemeral {
        log::info!("Using in-memory storage");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let db_path = get_database_path(config.data_dir.as_deref())?;
    let pool = Arc::new(create_connection_pool(&db_path)?);

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)
            .with_context(|| format!("Local storage at {} is damaged", db_path.display()))?;
    }

    Ok(Arc::new(SqliteStorage::new(pool)))
}

/// A one-shot command's failure becomes the process error
fn fail(error: ErrorResponse) -> anyhow::Error {
    anyhow::anyhow!(error.message)
}

fn print_entries(kind: CollectionKind, state: &AppState) {
    let entries = list_collection(state, kind);
    if entries.is_empty() {
        println!("The {} is empty.", kind);
        return;
    }
    for entry in entries {
        println!("{}", entry);
    }
}

fn joined(query: &[String]) -> String {
    query.join(" ")
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Search { query, shiny } => {
            if let Some(view) = search_creature(state, &joined(&query), shiny).await.map_err(fail)? {
                print!("{}", view);
            }
        }
        Command::Random { shiny } => {
            if let Some(view) = random_creature(state, shiny).await.map_err(fail)? {
                print!("{}", view);
            }
        }
        Command::Browse { filter, page } => {
            let page = browse(state, filter.as_deref(), page).await.map_err(fail)?;
            print!("{}", page);
        }
        Command::History { action } => match action.unwrap_or(ListAction::List) {
            ListAction::List => {
                for name in search_suggestions(state) {
                    println!("{}", name);
                }
            }
            ListAction::Clear => clear_collection(state, CollectionKind::History),
        },
        Command::Favorites { action } => match action.unwrap_or(FavoriteAction::List) {
            FavoriteAction::List => print_entries(CollectionKind::Favorites, state),
            FavoriteAction::Toggle { query } => {
                if search_creature(state, &joined(&query), false).await.map_err(fail)?.is_some() {
                    let now_favorite = toggle_favorite(state).map_err(fail)?;
                    println!(
                        "{} favorites.",
                        if now_favorite { "Added to" } else { "Removed from" }
                    );
                }
            }
            FavoriteAction::Clear => clear_collection(state, CollectionKind::Favorites),
        },
        Command::Team { action } => match action.unwrap_or(TeamAction::List) {
            TeamAction::List => print_entries(CollectionKind::Team, state),
            TeamAction::Add { query } => {
                if search_creature(state, &joined(&query), false).await.map_err(fail)?.is_some() {
                    let entry = add_to_team(state).map_err(fail)?;
                    println!("Added {} to the team.", entry.name);
                }
            }
            TeamAction::Remove { id } => remove_from_team(state, id),
            TeamAction::Clear => clear_collection(state, CollectionKind::Team),
        },
        Command::Compare => {
            println!("The compare list only lives within a session; use `pokehub shell`.");
        }
        Command::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            Shell::new(state).run(stdin, &mut stdout).await?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    log::info!("Using API at {}", config.api_base_url);

    // 1. INFRASTRUCTURE
    let storage = open_storage(&config)?;
    let api: Arc<dyn CreatureApi> = Arc::new(PokeApiClient::new(&config)?);

    // 2. REPOSITORIES, SERVICES, STATE
    let state = AppState::build(&config, storage, api);

    // 3. DISPATCH
    run(&state, cli.command.unwrap_or(Command::Shell)).await
}
