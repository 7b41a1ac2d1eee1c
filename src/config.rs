//! Configuration management for paintbox
//!
//! Supports:
//! - TOML config file at XDG locations
//! - Environment variable overrides
//! - Command-line argument overrides

use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File, FileFormat};
use env_logger::fmt::WriteStyle;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::fuzzy::{Metric, TieBreak};
use crate::reconcile::{ReconcilePolicy, DEFAULT_THRESHOLD};
use crate::store;

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Runtime context containing resolved configuration
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    pub global: GlobalOpts,
    pub config: AppConfig,
    config_path: PathBuf,
}

impl RuntimeContext {
    pub fn new(global: &GlobalOpts) -> Result<Self> {
        let config_path = resolve_config_path(global.config.as_ref())?;
        let config = load_config(&config_path, global)?;

        Ok(Self {
            global: global.clone(),
            config,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn init_logging(&self) -> Result<()> {
        if self.global.quiet {
            log::set_max_level(LevelFilter::Off);
            return Ok(());
        }

        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.config.logging.level),
        );

        builder.filter_level(self.effective_log_level());

        let force_color = env::var_os("FORCE_COLOR").is_some();
        let disable_color = self.global.no_color
            || env::var_os("NO_COLOR").is_some()
            || (!force_color && !std::io::stderr().is_terminal());

        if disable_color {
            builder.write_style(WriteStyle::Never);
        } else if force_color {
            builder.write_style(WriteStyle::Always);
        } else {
            builder.write_style(WriteStyle::Auto);
        }

        builder.try_init().or_else(|err| {
            if self.global.verbose > 0 {
                eprintln!("logger already initialized: {err}");
            }
            Ok(())
        })
    }

    fn effective_log_level(&self) -> LevelFilter {
        if self.global.trace {
            LevelFilter::Trace
        } else if self.global.debug {
            LevelFilter::Debug
        } else {
            match self.global.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        }
    }

    /// Get the effective inventory file path
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.global.store {
            return expand_path(path);
        }
        match self.config.store.path.as_deref() {
            Some(path) if !path.is_empty() => expand_path(Path::new(path)),
            _ => store::default_store_path(),
        }
    }

    /// Matching policy from config, with per-command overrides applied
    pub fn reconcile_policy(
        &self,
        threshold: Option<f64>,
        metric: Option<Metric>,
        tie_break: Option<TieBreak>,
    ) -> ReconcilePolicy {
        let base = self.config.reconcile;
        ReconcilePolicy {
            threshold: threshold.unwrap_or(base.threshold),
            metric: metric.unwrap_or(base.metric),
            tie_break: tie_break.unwrap_or(base.tie_break),
        }
    }

    /// Get the effective output format
    pub fn output_format(&self) -> OutputFormat {
        if self.global.json {
            return OutputFormat::Json;
        }
        self.global
            .output_format
            .unwrap_or(match self.config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "yaml" => OutputFormat::Yaml,
                "table" => OutputFormat::Table,
                _ => OutputFormat::Auto,
            })
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub reconcile: ReconcilePolicy,
    pub export: ExportConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Inventory file; empty means the XDG data directory
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub inventory_file: String,
    pub missing_file: String,
    pub export_missing: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            inventory_file: "paint_collection.csv".to_string(),
            missing_file: "missing_paints.csv".to_string(),
            export_missing: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub no_headers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            no_headers: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn resolve_config_path(override_path: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        let expanded = expand_path(path)?;
        if expanded.is_dir() {
            return Ok(expanded.join("config.toml"));
        }
        return Ok(expanded);
    }

    Ok(default_config_dir()?.join("config.toml"))
}

fn load_config(config_path: &Path, global: &GlobalOpts) -> Result<AppConfig> {
    // Create default config if it doesn't exist
    if !config_path.exists() {
        write_default_config(config_path)?;
    }

    let config = Config::builder()
        // Set defaults
        .set_default("reconcile.threshold", DEFAULT_THRESHOLD)?
        .set_default("reconcile.metric", Metric::default().to_string())?
        .set_default("reconcile.tie_break", "first-seen")?
        .set_default("export.inventory_file", "paint_collection.csv")?
        .set_default("export.missing_file", "missing_paints.csv")?
        .set_default("export.export_missing", true)?
        .set_default("output.format", "auto")?
        .set_default("output.no_headers", false)?
        .set_default("logging.level", "warn")?
        // Load from file
        .add_source(
            File::from(config_path)
                .format(FileFormat::Toml)
                .required(false),
        )
        // Environment variable overrides (PAINTBOX__*)
        .add_source(
            Environment::with_prefix("PAINTBOX")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // Apply CLI overrides
    if global.no_headers {
        app_config.output.no_headers = true;
    }

    Ok(app_config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }

    let config = AppConfig::default();
    let toml = toml::to_string_pretty(&config).context("serializing default config")?;

    let content = format!(
        "# paintbox configuration\n\
        # File: {}\n\
        #\n\
        # Environment variables:\n\
        #   PAINTBOX_STORE  - Inventory file path\n\
        #   PAINTBOX__*     - Override any config value (e.g., PAINTBOX__RECONCILE__THRESHOLD=0.8)\n\
        \n\
        {toml}",
        path.display()
    );

    fs::write(path, content).with_context(|| format!("writing config to {}", path.display()))
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    if let Some(text) = path.to_str() {
        let expanded = shellexpand::full(text).context("expanding path")?;
        Ok(PathBuf::from(expanded.to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn default_config_dir() -> Result<PathBuf> {
    // Check XDG_CONFIG_HOME first
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(APP_NAME));
    }

    // Use platform-specific config directory
    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    // Fallback to ~/.config
    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine configuration directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.reconcile.threshold, 0.75);
        assert_eq!(config.reconcile.metric, Metric::DamerauLevenshtein);
        assert_eq!(config.reconcile.tie_break, TieBreak::FirstSeen);
        assert!(config.export.export_missing);
        assert_eq!(config.export.missing_file, "missing_paints.csv");
        assert_eq!(config.output.format, "auto");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[reconcile]"));
        assert!(toml.contains("metric = \"damerau-levenshtein\""));
        assert!(toml.contains("[export]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[reconcile]\nthreshold = 0.9\nmetric = \"jaro-winkler\"\n\n[store]\npath = \"/tmp/p.json\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["paintbox", "config", "show"]);
        let config = load_config(&path, &cli.global).unwrap();

        assert_eq!(config.reconcile.threshold, 0.9);
        assert_eq!(config.reconcile.metric, Metric::JaroWinkler);
        assert_eq!(config.reconcile.tie_break, TieBreak::FirstSeen);
        assert_eq!(config.store.path.as_deref(), Some("/tmp/p.json"));
    }

    #[test]
    fn test_write_default_config_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let cli = Cli::parse_from(["paintbox", "--no-headers", "config", "path"]);
        let config = load_config(&path, &cli.global).unwrap();

        assert!(path.exists());
        assert!(config.output.no_headers);
        assert_eq!(config.reconcile.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_policy_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cli = Cli::parse_from([
            "paintbox",
            "--config",
            path.to_str().unwrap(),
            "--store",
            "/tmp/inventory.json",
            "config",
            "show",
        ]);
        let ctx = RuntimeContext::new(&cli.global).unwrap();

        let policy = ctx.reconcile_policy(Some(0.5), None, Some(TieBreak::Lexicographic));
        assert_eq!(policy.threshold, 0.5);
        assert_eq!(policy.metric, Metric::DamerauLevenshtein);
        assert_eq!(policy.tie_break, TieBreak::Lexicographic);
        assert_eq!(ctx.store_path().unwrap(), PathBuf::from("/tmp/inventory.json"));
    }
}
