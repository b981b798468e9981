//! Rocket CLI - Command line shopping cart for the RocketShoes storefront.
//!
//! Commands:
//! - `rocket show` - Print the cart
//! - `rocket add` - Add one unit of a product
//! - `rocket remove` - Remove a product
//! - `rocket update` - Set a product's amount
//! - `rocket config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{ConfigArgs, ProductArgs, UpdateArgs};
use config::{LogConfig, LogFormat};

/// Rocket CLI - Manage your RocketShoes cart from the terminal
#[derive(Parser)]
#[command(name = "rocket")]
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
    /// Show the cart with subtotals and total
    Show,

    /// Add one unit of a product
    Add(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set a product's amount
    Update(UpdateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(log: &LogConfig, verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { log.level.as_str() };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("rocket={level}").into());

    let use_json = json || log.format == LogFormat::Json;
    let json_layer = use_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!use_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    init_tracing(&ctx.config.log, cli.verbose, cli.json);

    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await.map(|()| 0),
        Commands::Add(args) => commands::cart::add(args, &ctx).await.map(commands::exit_code),
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await.map(commands::exit_code),
        Commands::Update(args) => commands::cart::update(args, &ctx).await.map(commands::exit_code),
        Commands::Config(args) => commands::config::run(args, &ctx).await.map(|()| 0),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
