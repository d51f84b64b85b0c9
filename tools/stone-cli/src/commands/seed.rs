//! Seed sample data into empty collections.

use anyhow::Result;

use stone_catalog::seed::{ensure_seed_data, sample_categories, sample_products};
use stone_catalog::{CATEGORIES_COLLECTION, PRODUCTS_COLLECTION};
use stone_store::DocumentStore;

use super::SeedArgs;
use crate::context::Context;

/// Run the seed command.
pub async fn run(args: SeedArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    if args.dry_run {
        let categories = store.count(CATEGORIES_COLLECTION).await?;
        let products = store.count(PRODUCTS_COLLECTION).await?;

        if categories == 0 {
            ctx.output
                .info(&format!("Would create {} categories", sample_categories().len()));
        } else {
            ctx.output.info(&format!(
                "Categories collection already holds {} document(s)",
                categories
            ));
        }

        if products == 0 {
            ctx.output
                .info(&format!("Would create {} products", sample_products().len()));
        } else {
            ctx.output.info(&format!(
                "Products collection already holds {} document(s)",
                products
            ));
        }

        return Ok(());
    }

    let spinner = ctx.output.spinner("Seeding sample data");
    let report = ensure_seed_data(&store).await?;
    spinner.finish_and_clear();

    if report.is_noop() {
        ctx.output.info("Sample data already present, nothing to do");
        return Ok(());
    }

    ctx.save_store(&store)?;
    ctx.output.success(&format!(
        "Seeded {} categories and {} products",
        report.categories_created, report.products_created
    ));

    Ok(())
}
