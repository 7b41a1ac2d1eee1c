//! Config command implementations

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::cli::ConfigCommand;
use crate::config::{self as app_config, AppConfig, RuntimeContext};
use crate::output::print_output;

/// Effective configuration plus the paths it resolved to
#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    config_file: String,
    store_file: String,
    #[serde(flatten)]
    config: &'a AppConfig,
}

pub fn run(ctx: &RuntimeContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(ctx),
        ConfigCommand::Get { key } => get(ctx, key.as_deref()),
        ConfigCommand::Reset => reset(ctx),
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    let effective = EffectiveConfig {
        config_file: ctx.config_path().display().to_string(),
        store_file: ctx.store_path()?.display().to_string(),
        config: &ctx.config,
    };
    print_output(ctx, &effective)
}

fn path(ctx: &RuntimeContext) -> Result<()> {
    println!("{}", ctx.config_path().display());
    Ok(())
}

fn get(ctx: &RuntimeContext, key: Option<&str>) -> Result<()> {
    match key {
        Some("store.path") => println!("{}", ctx.store_path()?.display()),
        Some(key) => println!("{}", get_config_value(&ctx.config, key)?),
        None => show(ctx)?,
    }
    Ok(())
}

fn reset(ctx: &RuntimeContext) -> Result<()> {
    app_config::write_default_config(ctx.config_path())?;
    println!(
        "Configuration reset to defaults at: {}",
        ctx.config_path().display()
    );
    Ok(())
}

/// Look up a dot-separated key in the configuration
fn get_config_value(config: &AppConfig, key: &str) -> Result<String> {
    let json = serde_json::to_value(config)?;

    let value = key
        .split('.')
        .try_fold(&json, |current, part| current.get(part))
        .ok_or_else(|| anyhow!("Configuration key not found: {key}"))?;

    Ok(match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        other => serde_json::to_string(other)?,
    })
}
