//! CLI frontend for the Tarot oracle deck.

mod commands;
mod docx;
mod logging;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tarot",
    about = "Tarot — draw and generate oracle cards for tabletop play",
    version,
    propagate_version = true
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw cards at random
    Draw {
        /// Number of cards to draw
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Draw distinct cards, as from a shuffled deck
        #[arg(short, long)]
        unique: bool,

        /// RNG seed for reproducible draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pick the friendly or hostile reaction for each card
        #[arg(long)]
        stance: bool,

        /// Catalog file (default: builtin catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Show a single card by id
    Show {
        /// Card id
        id: u32,

        /// Print the card in its framed deck layout
        #[arg(short, long)]
        framed: bool,

        /// Catalog file (default: builtin catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// List the cards of a catalog
    List {
        /// Only cards with this answer class (e.g. yes-but)
        #[arg(short, long)]
        title: Option<String>,

        /// Catalog file (default: builtin catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Generate a new deck from a word-table configuration
    Generate {
        /// Deck configuration file
        config: PathBuf,

        /// Number of cards (default: card_count from the configuration)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed for a reproducible deck
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the catalog as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the framed text deck to this file
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Write the deck as a Word document to this file
        #[arg(short, long)]
        docx: Option<PathBuf>,
    },

    /// Export a catalog to a different format
    Export {
        /// Output format: json, text, markdown, docx
        format: String,

        /// Output file path (default: stdout; required for docx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Catalog file (default: builtin catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Create a new deck directory with a template configuration
    Init {
        /// Name of the deck directory to create
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Draw {
            count,
            unique,
            seed,
            stance,
            catalog,
        } => commands::draw::run(catalog.as_deref(), count, unique, seed, stance),
        Commands::Show {
            id,
            framed,
            catalog,
        } => commands::show::run(catalog.as_deref(), id, framed),
        Commands::List { title, catalog } => {
            commands::list::run(catalog.as_deref(), title.as_deref())
        }
        Commands::Generate {
            config,
            count,
            seed,
            output,
            text,
            docx,
        } => commands::generate::run(
            &config,
            commands::generate::Options {
                count,
                seed,
                json: output,
                text,
                docx,
            },
        ),
        Commands::Export {
            format,
            output,
            catalog,
        } => commands::export::run(catalog.as_deref(), &format, output.as_deref()),
        Commands::Init { name } => commands::init::run(&name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
