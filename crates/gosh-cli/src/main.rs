//! Catalog command-line tool.
//!
//! Provides the `gosh` binary for working with a catalog database directly,
//! without a running server. Searches go through the same query normalizer
//! as the server, so results match `GET /api/program?q=`.
//!
//! Output is JSON on stdout. Exit codes: 0 = success, 1 = not found,
//! 3 = storage error.

use std::process;

use clap::{Parser, Subcommand};

use gosh_storage::{normalize_query, ProgramId, ProgramStore, SqliteStore, StorageError};

const EXIT_NOT_FOUND: i32 = 1;
const EXIT_STORAGE: i32 = 3;

/// Program catalog tools.
#[derive(Parser)]
#[command(name = "gosh", about = "Program catalog tools")]
struct Cli {
    /// Path to the catalog database file.
    #[arg(short, long, env = "GOSH_DB_PATH", default_value = "gosh.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create a program and print it with its assigned id.
    Create {
        /// Program name.
        #[arg(short, long)]
        name: String,

        /// Program description.
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Print one program by id.
    Get {
        /// Program ID.
        id: i64,
    },
    /// Full-text search; words are matched as a phrase.
    Search {
        /// Search text.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(&cli.db, cli.command));
}

fn run(db_path: &str, command: Commands) -> i32 {
    let mut store = match SqliteStore::new(db_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to open database '{}': {}", db_path, e);
            return EXIT_STORAGE;
        }
    };

    let output = match command {
        Commands::Create { name, description } => store
            .create_program(&name, &description)
            .and_then(|p| to_json(&p)),
        Commands::Get { id } => store.get_program(ProgramId(id)).and_then(|p| to_json(&p)),
        Commands::Search { query } => {
            let normalized = normalize_query(&query.join(" "));
            if normalized.is_empty() {
                Ok("[]".to_string())
            } else {
                store.search_text(&normalized).and_then(|p| to_json(&p))
            }
        }
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string_pretty(value).map_err(StorageError::from)
}

fn exit_code(err: &StorageError) -> i32 {
    if err.is_not_found() {
        EXIT_NOT_FOUND
    } else {
        EXIT_STORAGE
    }
}
