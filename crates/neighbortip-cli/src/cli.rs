//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Neighbortip - find your FID neighbors and tip them.
#[derive(Debug, Parser)]
#[command(name = "neighbortip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NEIGHBORTIP_CONFIG")]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (FIDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up the FIDs surrounding a center FID
    Sweep(SweepArgs),

    /// Send a tip to the owner of a FID
    Tip(TipArgs),

    /// Sign a message with the connected wallet
    Sign(SignArgs),

    /// Inspect wallet connectors
    Wallet(WalletArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Center FID (e.g., 822727)
    pub fid: String,
}

/// Arguments for the tip command.
#[derive(Debug, Parser)]
pub struct TipArgs {
    /// FID to tip
    pub fid: String,

    /// Amount in ETH (defaults to the profile's tip amount)
    #[arg(short, long)]
    pub amount: Option<String>,

    /// Wallet connector to send from
    #[arg(short = 'w', long)]
    pub connector: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the sign command.
#[derive(Debug, Parser)]
pub struct SignArgs {
    /// Message to sign
    pub message: Option<String>,

    /// Wallet connector to sign with
    #[arg(short = 'w', long)]
    pub connector: Option<String>,
}

/// Arguments for wallet inspection.
#[derive(Debug, Parser)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub action: WalletAction,
}

/// Wallet actions.
#[derive(Debug, Subcommand)]
pub enum WalletAction {
    /// List configured connectors
    Connectors,

    /// Connect and show the account
    Status {
        /// Connector name
        connector: Option<String>,
    },
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Proxy URL
        #[arg(short, long)]
        url: String,
        /// Wallet connector name
        #[arg(short = 'w', long, default_value = "local")]
        connector: String,
        /// Default tip amount in ETH
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
