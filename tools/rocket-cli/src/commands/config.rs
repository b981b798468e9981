//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, LogFormat};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    if let Some(ms) = api.timeout_ms {
        ctx.output.kv("timeout_ms", &ms.to_string());
    }
    if let Some(retries) = api.max_retries {
        ctx.output.kv("max_retries", &retries.to_string());
    }

    ctx.output.info("[storage]");
    ctx.output
        .kv("path", &ctx.storage_path().display().to_string());

    ctx.output.info("[log]");
    let format = match ctx.config.log.format {
        LogFormat::Human => "human",
        LogFormat::Json => "json",
    };
    ctx.output.kv("format", format);
    ctx.output.kv("level", &ctx.config.log.level);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
