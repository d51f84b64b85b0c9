//! CLI command implementations.

pub mod load;
pub mod post;
pub mod reset;
pub mod search;
pub mod seed;

use clap::Args;

/// Arguments for the load command.
#[derive(Args)]
pub struct LoadArgs {
    /// Skip seeding empty collections before loading.
    #[arg(long)]
    pub no_seed: bool,

    /// List every product instead of just the summary.
    #[arg(short, long)]
    pub full: bool,
}

/// Arguments for the seed command.
#[derive(Args)]
pub struct SeedArgs {
    /// Report what would be created without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search query.
    pub query: String,

    /// Show only the first N product hits.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the post command.
#[derive(Args)]
pub struct PostArgs {
    /// Product id to mark as posted.
    pub id: String,
}

/// Arguments for the reset command.
#[derive(Args)]
pub struct ResetArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Do not keep a backup of the current store file.
    #[arg(long)]
    pub no_backup: bool,
}
