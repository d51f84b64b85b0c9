//! Mark a product as posted.

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use stone_catalog::ids::ProductId;
use stone_catalog::{Product, ProductAdmin, PRODUCTS_COLLECTION};
use stone_media::MemoryBlobStore;
use stone_store::DocumentStore;

use super::PostArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the post command.
pub async fn run(args: PostArgs, ctx: &Context) -> Result<()> {
    let store = Arc::new(ctx.open_store()?);
    let id = ProductId::new(args.id);

    // Resolve the product first so the confirmation names it.
    let doc = store.get(PRODUCTS_COLLECTION, id.as_str()).await?;
    let Some(doc) = doc else {
        bail!("No product with id '{}'", id.as_str());
    };
    let product = Product::from_document(&doc);

    if product.status().is_some_and(|status| status == "posted") {
        ctx.output
            .info(&format!("\"{}\" is already posted", product.name));
        return Ok(());
    }

    // The post path never uploads images; the blob store is only here to
    // satisfy the admin surface.
    let admin = ProductAdmin::new(store.clone(), Arc::new(MemoryBlobStore::new()))
        .with_order(ctx.order())
        .with_logger(ctx.logger("product-admin"));

    admin
        .mark_posted(&id)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    ctx.save_store(&store)?;
    ctx.output.success(&format!(
        "Marked \"{}\" as {}",
        product.name,
        status_badge("posted")
    ));

    Ok(())
}
