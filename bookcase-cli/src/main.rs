//! Bookcase CLI - Command-line front end for the book catalog

mod commands;

use anyhow::Result;
use bookcase_core::BookId;
use clap::{Parser, Subcommand};
use commands::DraftArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate page size (must be at least 1)
fn parse_size(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("size must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "bookcase")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Book-storage API base URL (overrides BOOKCASE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books in the catalog
    List {
        /// Only books whose title or author matches
        #[arg(short, long)]
        search: Option<String>,

        /// Zero-based page index
        #[arg(long)]
        page: Option<u32>,

        /// Books per page
        #[arg(long, value_parser = parse_size)]
        size: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single book
    Show {
        /// Book id
        id: BookId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new book
    New {
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Edit an existing book
    Edit {
        /// Book id
        id: BookId,

        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Delete a book
    Delete {
        /// Book id
        id: BookId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Open a client path such as /books/3 and render that screen
    Open {
        /// Path to open
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for rendered output
    let filter = if cli.verbose {
        "bookcase_cli=debug,bookcase_core=debug"
    } else {
        "bookcase_cli=info,bookcase_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut session = commands::Session::connect(cli.api_url.as_deref())?;

    match cli.command {
        Commands::List {
            search,
            page,
            size,
            json,
        } => commands::list(&mut session, search, page, size, json).await,

        Commands::Show { id, json } => commands::show(&mut session, id, json).await,

        Commands::New { draft } => commands::create(&mut session, draft).await,

        Commands::Edit { id, draft } => commands::edit(&mut session, id, draft).await,

        Commands::Delete { id, yes } => commands::delete(&mut session, id, yes).await,

        Commands::Open { path, json } => commands::open(&mut session, &path, json).await,
    }
}
