//! Cart commands.

use anyhow::Result;
use rocket_cart::prelude::{CartStore, MutationOutcome};

use super::{ProductArgs, UpdateArgs};
use crate::context::Context;

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = open(ctx)?;
    ctx.output.cart(&store.cart());
    Ok(())
}

/// Run the add command.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<MutationOutcome> {
    let store = open(ctx)?;
    let outcome = store.add_product(args.id).await;
    if outcome.is_committed() {
        let amount = store.cart().get(args.id).map(|i| i.amount).unwrap_or_default();
        ctx.output
            .success(&format!("Added product {} (amount: {})", args.id, amount));
    }
    finish(ctx, &store, outcome)
}

/// Run the remove command.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<MutationOutcome> {
    let store = open(ctx)?;
    let outcome = store.remove_product(args.id).await;
    if outcome.is_committed() {
        ctx.output.success(&format!("Removed product {}", args.id));
    }
    finish(ctx, &store, outcome)
}

/// Run the update command.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<MutationOutcome> {
    let store = open(ctx)?;
    let outcome = store.update_product_amount(args.id, args.amount).await;
    match outcome {
        MutationOutcome::Committed => ctx.output.success(&format!(
            "Product {} amount set to {}",
            args.id, args.amount
        )),
        MutationOutcome::Ignored => ctx
            .output
            .debug(&format!("Ignored amount {} for product {}", args.amount, args.id)),
        MutationOutcome::Rejected => {}
    }
    finish(ctx, &store, outcome)
}

fn open(ctx: &Context) -> Result<CartStore> {
    ctx.output
        .debug(&format!("Storage: {}", ctx.storage_path().display()));
    ctx.output
        .debug(&format!("Catalog: {}", ctx.config.api.base_url));
    ctx.cart_store()
}

/// In JSON mode every mutation prints the resulting snapshot.
fn finish(ctx: &Context, store: &CartStore, outcome: MutationOutcome) -> Result<MutationOutcome> {
    if ctx.output.is_json() {
        ctx.output.json(&*store.cart());
    }
    Ok(outcome)
}
