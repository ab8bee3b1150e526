use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memodb_history::{VersioningOptions, derive_history_ddl};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "history-tool")]
#[command(about = "Derives history table DDL for RustMemDB schemas")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print CREATE TABLE statements for the history tables of a schema
    Derive {
        /// CREATE TABLE script with the versioned tables
        #[arg(long)]
        ddl: PathBuf,
        /// JSON file with versioning options
        #[arg(long)]
        options: Option<PathBuf>,
        /// CREATE TABLE script of the live database, used for column order inspection
        #[arg(long)]
        live_ddl: Option<PathBuf>,
        /// Only derive history tables for these source tables
        #[arg(long)]
        table: Vec<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the default versioning options as JSON
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Derive {
            ddl,
            options,
            live_ddl,
            table,
            out,
        } => {
            let output = derive(&ddl, options.as_deref(), live_ddl.as_deref(), &table)?;
            match out {
                Some(out) => {
                    ensure_parent_dir(&out)?;
                    fs::write(&out, output).with_context(|| {
                        format!("Failed to write history DDL to '{}'", out.display())
                    })?;
                    println!("Generated history DDL: {}", out.display());
                }
                None => println!("{}", output),
            }
            Ok(())
        }
        Command::Defaults => {
            let json = serde_json::to_string_pretty(&VersioningOptions::default())?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn derive(
    ddl: &Path,
    options: Option<&Path>,
    live_ddl: Option<&Path>,
    only: &[String],
) -> Result<String> {
    let options = match options {
        Some(path) => VersioningOptions::from_json_file(path)
            .with_context(|| format!("Invalid options file '{}'", path.display()))?,
        None => VersioningOptions::default(),
    };
    let live_ddl = live_ddl.map(read_file).transpose()?;

    derive_history_ddl(&read_file(ddl)?, options, live_ddl.as_deref(), only)
        .with_context(|| format!("Failed to derive history tables from '{}'", ddl.display()))
}
