//! Replace the store file with freshly seeded sample data.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;

use stone_catalog::seed::ensure_seed_data;
use stone_store::MemoryStore;

use super::ResetArgs;
use crate::context::Context;

/// Run the reset command.
pub async fn run(args: ResetArgs, ctx: &Context) -> Result<()> {
    let path = ctx.store_path();

    if !args.yes {
        ctx.output.warn(&format!(
            "This will replace {} with freshly seeded sample data",
            path.display()
        ));

        let confirmed = Confirm::new()
            .with_prompt("Proceed with reset?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    if path.exists() && !args.no_backup {
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
        let backup = path.with_extension(format!("backup-{}.json", stamp));
        std::fs::copy(&path, &backup)
            .with_context(|| format!("Failed to back up store file to {}", backup.display()))?;
        ctx.output
            .info(&format!("Backed up current store to {}", backup.display()));
    }

    let store = MemoryStore::new();

    let spinner = ctx.output.spinner("Seeding fresh sample data");
    let report = ensure_seed_data(&store).await?;
    spinner.finish_and_clear();

    ctx.save_store(&store)?;
    ctx.output.success(&format!(
        "Store reset with {} categories and {} products",
        report.categories_created, report.products_created
    ));

    Ok(())
}
