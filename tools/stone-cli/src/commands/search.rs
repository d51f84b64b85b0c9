//! Search products and categories.

use std::sync::Arc;

use anyhow::Result;

use stone_catalog::search::{search, SearchHit};
use stone_catalog::{CatalogLoader, LoaderConfig};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = Arc::new(ctx.open_store()?);

    // Search reads whatever is there; it never seeds.
    let config = LoaderConfig {
        order: ctx.order(),
        seed_if_empty: false,
    };
    let loader = CatalogLoader::new(store)
        .with_config(config)
        .with_logger(ctx.logger("catalog-loader"));
    let snapshot = loader.load().await;

    let results = search(&snapshot, &args.query);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    if results.is_empty() {
        ctx.output.info(&format!("No matches for \"{}\"", args.query));
        if snapshot.is_demo() {
            ctx.output
                .warn("Searched the demo catalog. The store file is empty or unreadable.");
        }
        return Ok(());
    }

    ctx.output.header(&format!("Results for \"{}\"", args.query));

    let mut products_shown = 0;
    for hit in results.hits() {
        match hit {
            SearchHit::Category(category) => {
                ctx.output.list_item(&format!(
                    "category  {} [{}] - {} product(s)",
                    category.name, category.kind, category.product_count
                ));
            }
            SearchHit::Product(product) => {
                if args.limit.is_some_and(|limit| products_shown >= limit) {
                    break;
                }
                products_shown += 1;
                ctx.output.list_item(&format!(
                    "product   {} - {} ({})",
                    product.name, product.price, product.category
                ));
            }
        }
    }

    let hidden = results.products.len().saturating_sub(products_shown);
    if hidden > 0 {
        ctx.output.info(&format!("... and {} more product(s)", hidden));
    }

    Ok(())
}
