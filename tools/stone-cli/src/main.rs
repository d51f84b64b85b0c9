//! Stone CLI - Command line tool for the StoneCraft catalog platform.
//!
//! Commands:
//! - `stone load` - Load the catalog the way the storefront does
//! - `stone seed` - Seed sample data into empty collections
//! - `stone search` - Search products and categories
//! - `stone post` - Mark a product as posted
//! - `stone reset` - Replace the store file with fresh sample data

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{LoadArgs, PostArgs, ResetArgs, SearchArgs, SeedArgs};

/// Stone CLI - Inspect and manage a StoneCraft catalog store
#[derive(Parser)]
#[command(name = "stone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and show what the storefront would render
    Load(LoadArgs),

    /// Seed sample data into empty collections
    Seed(SeedArgs),

    /// Search products and categories
    Search(SearchArgs),

    /// Mark a product as posted
    Post(PostArgs),

    /// Replace the store file with freshly seeded sample data
    Reset(ResetArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Load(args) => commands::load::run(args, &ctx).await,
        Commands::Seed(args) => commands::seed::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Post(args) => commands::post::run(args, &ctx).await,
        Commands::Reset(args) => commands::reset::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
