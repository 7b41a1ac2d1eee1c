//! Output formatting utilities
//!
//! Handles JSON, YAML, and table output formats.

use std::io::IsTerminal;

use anyhow::Result;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::config::RuntimeContext;

/// Format and print data according to the configured output format
pub fn print_output<T: Serialize>(ctx: &RuntimeContext, data: &T) -> Result<()> {
    let output = format_output(ctx.output_format(), std::io::stdout().is_terminal(), data)?;
    println!("{output}");
    Ok(())
}

/// Format data as JSON or YAML; tables fall back to pretty JSON
pub fn format_output<T: Serialize>(format: OutputFormat, is_tty: bool, data: &T) -> Result<String> {
    match format {
        OutputFormat::Json => {
            if is_tty {
                Ok(serde_json::to_string_pretty(data)?)
            } else {
                Ok(serde_json::to_string(data)?)
            }
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Table | OutputFormat::Auto => {
            // For auto, use JSON when piped
            if !is_tty && matches!(format, OutputFormat::Auto) {
                Ok(serde_json::to_string(data)?)
            } else {
                Ok(serde_json::to_string_pretty(data)?)
            }
        }
    }
}

/// Whether the current format should be rendered for humans
pub fn wants_table(format: OutputFormat, is_tty: bool) -> bool {
    match format {
        OutputFormat::Table => true,
        OutputFormat::Auto => is_tty,
        _ => false,
    }
}

/// Serialize `data` for machine formats, otherwise run `render`
pub fn output_for_format<T, F>(ctx: &RuntimeContext, data: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> Result<()>,
{
    if wants_table(ctx.output_format(), std::io::stdout().is_terminal()) {
        render()
    } else {
        print_output(ctx, data)
    }
}

/// Print a table from items that implement Tabled
pub fn print_table<T: Tabled>(ctx: &RuntimeContext, items: &[T]) -> Result<()> {
    let no_headers = ctx.global.no_headers || ctx.config.output.no_headers;
    println!("{}", build_table(items, no_headers));
    Ok(())
}

fn build_table<T: Tabled>(items: &[T], no_headers: bool) -> Table {
    let mut table = Table::new(items);
    table.with(Style::sharp());

    if no_headers {
        table.with(tabled::settings::Remove::row(
            tabled::settings::object::Rows::first(),
        ));
    }

    table
}
