//! Check command: reconcile a pasted list against the inventory

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::CheckCommand;
use crate::config::RuntimeContext;
use crate::export::export_unresolved;
use crate::output::{output_for_format, print_table};
use crate::reconcile::{reconcile, split_lines, KnownNames, ReconcilePolicy};
use crate::report::Report;
use crate::store::Inventory;

pub fn run(ctx: &RuntimeContext, cmd: CheckCommand) -> Result<()> {
    let raw = read_input(cmd.file.as_deref())?;
    let policy = ctx.reconcile_policy(cmd.threshold, cmd.metric, cmd.tie_break);
    let inventory = Inventory::open(&ctx.store_path()?)?;
    let report = check_list(&raw, &inventory, &policy)?;

    output_for_format(ctx, &report, || {
        if report.summary.total == 0 {
            println!("No paint names to check");
            return Ok(());
        }
        if cmd.grouped {
            print!("{}", report.render_text());
        } else {
            print_table(ctx, &report.rows())?;
        }
        println!("{}", report.summary_line());
        Ok(())
    })?;

    if let Some(path) = export_target(ctx, &cmd, &report) {
        let rows = export_unresolved(&path, report.unresolved())?;
        eprintln!("{rows} unresolved names saved to '{}'.", path.display());
    }

    Ok(())
}

/// Classify raw pasted bytes against the paint names in `inventory`
///
/// The engine only sees a snapshot of the name field; brands play no part in
/// matching.
fn check_list(raw: &[u8], inventory: &Inventory, policy: &ReconcilePolicy) -> Result<Report> {
    let lines = split_lines(raw)?;
    policy.validate()?;

    let known = KnownNames::new(inventory.names());
    if known.is_empty() {
        log::warn!("Inventory at {} is empty", inventory.path().display());
    } else {
        log::debug!("{} known names in {}", known.len(), inventory.path().display());
    }

    Ok(Report::from_results(reconcile(&lines, &known, policy)?))
}

/// Where to write unresolved names, if anywhere
fn export_target(ctx: &RuntimeContext, cmd: &CheckCommand, report: &Report) -> Option<PathBuf> {
    if cmd.no_export || report.unresolved().is_empty() {
        return None;
    }
    if let Some(ref path) = cmd.export_path {
        return Some(path.clone());
    }
    if !ctx.config.export.export_missing {
        return None;
    }
    Some(PathBuf::from(&ctx.config.export.missing_file))
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("reading paint list {}", path.display()))
        }
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("reading paint list from stdin")?;
            Ok(buffer)
        }
    }
}
