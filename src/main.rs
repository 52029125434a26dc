use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use compact_index::config::Config;
use compact_index::versions::{Clock, PackageVersionsEntry, VersionsFile};

#[derive(Parser, Debug)]
#[command(name = "compact-index")]
#[command(version, about = "Maintain the versions list of a compact package index")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Versions list path (overrides versionsPath from the config file)
    #[arg(long, global = true, value_name = "FILE")]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Rewrite the versions list from entry lines ("name v1,v2"), read from INPUT or stdin
    Create { input: Option<PathBuf> },

    /// Append entry lines to the versions list, read from INPUT or stdin
    Update { input: Option<PathBuf> },

    /// Print the versions list
    Contents {
        /// Entry lines appended to the output only
        #[arg(long, value_name = "FILE")]
        extra: Option<PathBuf>,
    },

    /// Print the last modification time of the versions list
    UpdatedAt,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    // Commands still run when the log file is unavailable
    let _guard = compact_index::log::init(&config.log.level)
        .inspect_err(|e| eprintln!("Logging disabled: {:#}", e))
        .ok();

    let versions_file = VersionsFile::new(config.resolve_versions_path(cli.path));
    run(&versions_file, cli.command, &mut io::stdout().lock())
}

fn run<C: Clock>(
    versions_file: &VersionsFile<C>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Create { input } => {
            let entries = read_entries(input.as_deref())?;
            versions_file
                .create(&entries)
                .with_context(|| format!("Failed to create {:?}", versions_file.path()))?;
        }
        Command::Update { input } => {
            let entries = read_entries(input.as_deref())?;
            versions_file
                .update(&entries)
                .with_context(|| format!("Failed to update {:?}", versions_file.path()))?;
        }
        Command::Contents { extra } => {
            let extra = match extra {
                Some(path) => read_entries(Some(path.as_path()))?,
                None => Vec::new(),
            };
            out.write_all(versions_file.contents_with(&extra)?.as_bytes())?;
        }
        Command::UpdatedAt => {
            writeln!(out, "{}", versions_file.updated_at()?.to_rfc3339())?;
        }
    }
    Ok(())
}

fn read_entries(input: Option<&Path>) -> anyhow::Result<Vec<PackageVersionsEntry>> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read entries from {:?}", path))?,
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read entries from stdin")?;
            raw
        }
    };
    parse_entries(&raw)
}

/// Parse entry lines, skipping blank ones
fn parse_entries(raw: &str) -> anyhow::Result<Vec<PackageVersionsEntry>> {
    let entries = raw
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| PackageVersionsEntry::parse_line(i + 1, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
