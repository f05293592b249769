use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;

mod commands;

use commands::{batch, info};

#[derive(Parser, Debug)]
#[command(
    name = "ciforge",
    about = "A command-line tool for parsing mmCIF entries against DSSP residue lists.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// TOML settings file. When omitted, built-in defaults are used.
    #[arg(short, long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one entry and print its chains, metadata and parse statistics.
    Info(info::InfoArgs),
    /// Parse many entries and print one summary row per file.
    Batch(batch::BatchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let context = commands::load_context(cli.settings.as_deref())
        .context("Failed to load parser settings")?;

    match cli.command {
        Command::Info(args) => info::run(&args, &context)?,
        Command::Batch(args) => batch::run(&args, &context)?,
    }

    Ok(())
}
