use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taskboard_cli::commands::Command;
use taskboard_db::{Database, DbError};

/// Environment variable name for the database path
const TB_DB_PATH_ENV: &str = "TB_DB_PATH";

/// Taskboard - personal task lists with scoped, filtered browsing
#[derive(Parser)]
#[command(name = "tb")]
#[command(version = "0.1.0")]
#[command(about = "Personal task lists from the command line", long_about = None)]
struct Args {
    /// Path to the database directory (can also be set via TB_DB_PATH env var)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Act as this user id
    #[arg(long = "as", global = true, env = "TB_USER")]
    as_user: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the database path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --db argument
/// 2. TB_DB_PATH environment variable (if non-empty)
/// 3. `<git root>/.taskboard/data`, or `./.taskboard/data` outside a repository
fn resolve_db_path(cli_db: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_db {
        return path;
    }

    if let Ok(env_path) = std::env::var(TB_DB_PATH_ENV)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }

    Database::default_path()
}

/// Initialize logging from `RUST_LOG`, defaulting to warnings only.
///
/// Examples:
/// - `RUST_LOG=debug` - show repository and browse activity
/// - `RUST_LOG=taskboard_db=trace` - include rendered statements
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> Result<(), DbError> {
    let args = Args::parse();
    let output = run_with_args(&args).await?;
    println!("{}", output);
    Ok(())
}

/// Run the application with the given arguments and return what to print
async fn run_with_args(args: &Args) -> Result<String, DbError> {
    let db_path = resolve_db_path(args.db.clone());
    debug!("Using database at {}", db_path.display());

    let db = Database::connect(&db_path).await?;
    db.init().await?;

    match &args.command {
        Some(cmd) => cmd.execute(&db, args.as_user.as_deref()).await,
        None => Ok("Welcome to Taskboard!\nUse 'tb --help' for usage information.".to_string()),
    }
}
