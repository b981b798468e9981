//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};
use rocket_cart::prelude::{MutationOutcome, ProductId};

/// Arguments for commands acting on one product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: ProductId,

    /// New amount. Values below 1 are ignored.
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Process exit code for a cart mutation.
pub fn exit_code(outcome: MutationOutcome) -> i32 {
    match outcome {
        MutationOutcome::Committed | MutationOutcome::Ignored => 0,
        MutationOutcome::Rejected => 1,
    }
}
