use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Checks for new Quillpost releases and manages the update preferences
#[derive(Debug, Parser)]
#[command(author, version, infer_subcommands = true, subcommand_required = true)]
pub struct Cli {
    /// Log at debug level for this run, regardless of settings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Keep settings, update state and logs under this directory instead of the platform default
    #[arg(long, global = true, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Checks whether a newer release is published
    Check(CheckArgs),

    /// Shows the running version, the last check time and the auto-check preference
    Status,

    /// Turns periodic update checks on or off
    AutoCheck(AutoCheckArgs),

    /// Opens the latest release page, or one of its downloads, in the default browser
    Open(OpenArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct RepoArgs {
    /// Owner of the repository publishing releases (defaults to the configured one)
    #[arg(long)]
    pub owner: Option<String>,

    /// Name of the repository publishing releases (defaults to the configured one)
    #[arg(long)]
    pub repo: Option<String>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Version to compare against instead of the running one
    #[arg(long, value_name = "VERSION")]
    pub current: Option<String>,

    /// Only check if auto-check is enabled and the last check is older than the configured interval
    ///
    /// Meant to be called from a scheduler such as cron or a login hook
    #[arg(long)]
    pub auto: bool,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Debug, Args)]
pub struct AutoCheckArgs {
    pub state: Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Name of the release asset to download instead of opening the release page
    #[arg(long, value_name = "NAME")]
    pub asset: Option<String>,

    #[command(flatten)]
    pub repo: RepoArgs,
}
