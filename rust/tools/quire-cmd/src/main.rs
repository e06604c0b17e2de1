use anyhow::Result;
use clap::{Parser, Subcommand};
use quire_versification::Catalog;

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "quire-cmd")]
#[command(about = "Command-line utility for Quire module operations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a module from a verse-per-line source file
    Create {
        /// Module name
        #[arg(long)]
        name: String,

        /// Versification system the source follows
        #[arg(long, default_value = "KJV")]
        versification: String,

        /// Block compression codec (lzss, zip)
        #[arg(long, default_value = "lzss")]
        compress: String,

        /// Block granularity (book, chapter, verse)
        #[arg(long, default_value = "book")]
        block: String,

        /// Description entry for the generated config
        #[arg(long)]
        description: Option<String>,

        /// Source file: one `reference<TAB>text` line per verse
        #[arg(short, long)]
        file: String,

        /// Output module directory
        dir: String,
    },

    /// Inspect a module and display summary information
    Inspect {
        /// Increase verbosity (-v adds coverage and config entries)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Path to the module .conf file
        conf_path: String,
    },

    /// Resolve a passage reference against a module
    Resolve {
        /// Path to the module .conf file
        conf_path: String,

        /// Passage reference, e.g. "Gen 1:1-3; Exod 2"
        reference: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = Catalog::new();

    match cli.command {
        Commands::Create {
            name,
            versification,
            compress,
            block,
            description,
            file,
            dir,
        } => commands::create::run(
            &catalog,
            name,
            versification,
            compress,
            block,
            description,
            file,
            dir,
        ),
        Commands::Inspect { verbose, conf_path } => {
            commands::inspect::run(&catalog, verbose, conf_path)
        }
        Commands::Resolve {
            conf_path,
            reference,
        } => commands::resolve::run(&catalog, conf_path, reference),
    }
}
