use std::path::PathBuf;

use clap::Subcommand;

mod case;

pub(crate) use self::case::{
    AnalysisCommands, CaseCommands, CollectionCommands, CollectorCommands,
};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a workspace (.helium)
    Init {
        /// Server base URL, e.g. https://helium.example.org
        #[arg(long)]
        url: String,
        /// Bearer token
        #[arg(long)]
        token: Option<String>,
        /// Path prefix of the REST API
        #[arg(long, default_value = "/api")]
        api_prefix: String,
        /// Seconds disk usage may be served from cache
        #[arg(long)]
        disk_usage_ttl: Option<u64>,
        /// Re-initialize if .helium already exists
        #[arg(long)]
        force: bool,
        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show server version and banner
    Info {
        #[arg(long)]
        json: bool,
    },

    /// List cases (open first, newest first)
    Cases {
        /// Filter on name, description or tsid
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Per-case storage usage
    DiskUsage {
        #[arg(long)]
        json: bool,
    },

    /// Collector profiles available for an operating system
    Profiles {
        opsystem: String,
        #[arg(long)]
        json: bool,
    },

    /// Manage a case
    Case {
        #[command(subcommand)]
        command: CaseCommands,
    },

    /// Manage the collectors of a case
    Collector {
        #[command(subcommand)]
        command: CollectorCommands,
    },

    /// Manage the collections of a case
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },

    /// Run and inspect analyses of a collection
    Analysis {
        #[command(subcommand)]
        command: AnalysisCommands,
    },
}
