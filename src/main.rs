//! paintbox - A slim CLI for tracking a miniature paint collection
//!
//! Keeps a local inventory of paints and checks pasted shopping or painting
//! lists against it, suggesting likely matches for misspelled names.

mod cli;
mod commands;
mod config;
mod export;
mod fuzzy;
mod normalize;
mod output;
mod reconcile;
mod report;
mod store;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::RuntimeContext;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = RuntimeContext::new(&cli.global)?;
    ctx.init_logging()?;

    log::debug!("Config loaded from: {:?}", ctx.config_path());

    run_command(&ctx, cli.command)
}

fn run_command(ctx: &RuntimeContext, command: Command) -> Result<()> {
    match command {
        Command::Add(cmd) => commands::add::run(ctx, cmd),
        Command::List(cmd) => commands::list::run(ctx, cmd),
        Command::Check(cmd) => commands::check::run(ctx, cmd),
        Command::Export { path } => commands::export::run(ctx, path),
        Command::Config { command } => commands::config::run(ctx, command),
        Command::Completions { shell } => commands::completions::run(shell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::parse_from([
            "paintbox",
            "check",
            "list.txt",
            "--threshold",
            "0.8",
            "--metric",
            "jaro-winkler",
            "--tie-break",
            "lexicographic",
        ]);
        match cli.command {
            Command::Check(cmd) => {
                assert_eq!(cmd.threshold, Some(0.8));
                assert_eq!(cmd.metric, Some(fuzzy::Metric::JaroWinkler));
                assert_eq!(cmd.tie_break, Some(fuzzy::TieBreak::Lexicographic));
                assert!(!cmd.no_export);
            }
            _ => panic!("Expected check command"),
        }
    }

    #[test]
    fn test_parse_add_defaults() {
        let cli = Cli::parse_from(["paintbox", "add", "-b", "Citadel", "-n", "Wraithbone"]);
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.paint_type, store::PaintType::Base);
                assert_eq!(cmd.status, store::PaintStatus::Owned);
                assert_eq!(cmd.quantity, 1);
            }
            _ => panic!("Expected add command"),
        }
    }

    #[test]
    fn test_add_rejects_non_numeric_quantity() {
        let result = Cli::try_parse_from([
            "paintbox", "add", "-b", "Citadel", "--name", "Wraithbone", "--quantity", "two",
        ]);
        assert!(result.is_err());
    }
}
