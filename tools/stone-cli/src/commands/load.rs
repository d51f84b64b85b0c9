//! Load the catalog the way the storefront does.

use std::sync::Arc;

use anyhow::Result;

use stone_catalog::{CatalogLoader, CatalogSnapshot, LoaderConfig};

use super::LoadArgs;
use crate::context::Context;
use crate::output::{status_badge, tier_badge, TerminalNoticeSink};

/// Run the load command.
pub async fn run(args: LoadArgs, ctx: &Context) -> Result<()> {
    let store = Arc::new(ctx.open_store()?);

    let config = LoaderConfig {
        order: ctx.order(),
        seed_if_empty: !args.no_seed,
    };
    let loader = CatalogLoader::new(store.clone())
        .with_config(config)
        .with_notice_sink(Arc::new(TerminalNoticeSink::new(ctx.output.clone())))
        .with_logger(ctx.logger("catalog-loader"));

    let spinner = ctx.output.spinner("Loading catalog");
    let snapshot = loader.load().await;
    spinner.finish_and_clear();

    // Seeding may have written documents; keep the file in step.
    if !args.no_seed {
        ctx.save_store(&store)?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return Ok(());
    }

    print_snapshot(&snapshot, args.full, ctx);
    Ok(())
}

fn print_snapshot(snapshot: &CatalogSnapshot, full: bool, ctx: &Context) {
    ctx.output.header("StoneCraft catalog");
    ctx.output.kv("Tier", &tier_badge(snapshot.tier));
    ctx.output.kv("Products", &snapshot.products.len().to_string());
    ctx.output.kv("Categories", &snapshot.categories.len().to_string());

    ctx.output.header("Categories");
    for category in &snapshot.categories {
        ctx.output.list_item(&format!(
            "{} [{}] - {} product(s)",
            category.name, category.kind, category.product_count
        ));
    }

    if full {
        ctx.output.header("Products");
        ctx.output.table_row(&["ID", "NAME", "PRICE", "CATEGORY", "STATUS"], &[10, 28, 12, 14, 8]);
        ctx.output.info(&"-".repeat(80));

        for product in &snapshot.products {
            let status = product.status().map(status_badge).unwrap_or_default();

            ctx.output.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    &product.price,
                    &product.category,
                    &status,
                ],
                &[10, 28, 12, 14, 8],
            );
        }

        ctx.output.info("");
        ctx.output.info(&format!("Total: {} product(s)", snapshot.products.len()));
    }
}
