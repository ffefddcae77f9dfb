use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Purge-cycle and bad-data QC flagging for surface met day files.
#[derive(Parser)]
#[command(
    name = "metqc",
    version,
    about = "Purge-cycle QC flagging for temperature/humidity day files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Flag one day file in place.
    Flag(FlagArgs),
    /// Print the time-of-day shift between the purges of two day files.
    Shift(ShiftArgs),
    /// Flag consecutive day files in order, chaining each to the next.
    Batch(BatchArgs),
}

/// Options shared by `flag` and `batch`.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Correction file listing bad air temperature intervals.
    #[arg(long = "corr-file-temperature")]
    pub corr_file_temperature: Option<PathBuf>,

    /// Correction file listing bad relative humidity intervals.
    #[arg(long = "corr-file-rh")]
    pub corr_file_rh: Option<PathBuf>,

    /// Reset existing purge and recovery flags before flagging.
    #[arg(long)]
    pub clear: bool,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `flag` subcommand.
#[derive(clap::Args)]
pub struct FlagArgs {
    /// Day file to flag.
    pub file: PathBuf,

    /// Previous day's file, used to recover missed purges.
    #[arg(long = "previous-file")]
    pub previous_file: Option<PathBuf>,

    /// Shift (seconds) applied to the previous day's purge times instead of
    /// the computed one.
    #[arg(long, allow_negative_numbers = true)]
    pub shift: Option<f64>,

    /// Explicit purge interval as START,END (ISO 8601). Repeatable.
    #[arg(long = "interval", value_name = "START,END")]
    pub intervals: Vec<String>,

    /// Compute and report flags without writing them.
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the `shift` subcommand.
#[derive(clap::Args)]
pub struct ShiftArgs {
    /// Reference day file.
    pub file_a: PathBuf,

    /// Day file whose shift relative to the reference is printed.
    pub file_b: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `batch` subcommand.
#[derive(clap::Args)]
pub struct BatchArgs {
    /// Day files in calendar order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}
