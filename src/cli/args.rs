use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line arguments for bfc
#[derive(Parser, Debug)]
#[command(
    name = "bfc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Command line client for the Batfish network configuration analysis service",
    long_about = "A command line client for the Batfish network configuration analysis service: query component versions and manage networks and snapshots."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Service host (overrides configuration)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Service port (overrides configuration)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the versions of the service components
    Versions,
    /// Network management commands
    Network(NetworkArgs),
    /// Snapshot management commands
    Snapshot(SnapshotArgs),
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display client version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
}

/// Network management arguments
#[derive(ClapArgs, Debug)]
pub struct NetworkArgs {
    /// Network subcommand
    #[command(subcommand)]
    pub command: NetworkCommand,
}

/// Snapshot management arguments
#[derive(ClapArgs, Debug)]
pub struct SnapshotArgs {
    /// Network the snapshots belong to (defaults to the configured network)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Snapshot subcommand
    #[command(subcommand)]
    pub command: SnapshotCommand,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Network subcommands
#[derive(Subcommand, Debug)]
pub enum NetworkCommand {
    /// List networks on the service
    List,
    /// Create a network (no-op if it exists)
    Create {
        /// Network name
        name: String,
    },
    /// Delete a network
    Delete {
        /// Network name
        name: String,
    },
}

/// Snapshot subcommands
#[derive(Subcommand, Debug)]
pub enum SnapshotCommand {
    /// List snapshots in the network
    List,
    /// Delete a snapshot
    Delete {
        /// Snapshot name
        name: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate configuration
    Validate {
        /// Configuration file path
        file: Option<String>,
    },
    /// Create default configuration
    Init {
        /// Directory to create `.batfish/config.toml` in
        #[arg(long = "dir")]
        dir: Option<String>,
        /// Write the global configuration instead
        #[arg(short, long)]
        global: bool,
    },
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
