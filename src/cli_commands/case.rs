use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum CaseCommands {
    /// Show a case with its collectors and collections
    Show {
        case: String,
        #[arg(long)]
        json: bool,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tsid: Option<String>,
        /// Access control entries (repeatable)
        #[arg(long = "acs")]
        acs: Vec<String>,
    },
    Edit {
        case: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tsid: Option<String>,
    },
    Close {
        case: String,
    },
    Reopen {
        case: String,
    },
    /// Delete a case (asks for its name)
    Delete {
        case: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum CollectorCommands {
    Add {
        case: String,
        #[arg(long)]
        arch: String,
        #[arg(long)]
        opsystem: String,
        #[arg(long)]
        profile: Option<String>,
        #[arg(long, default_value = "")]
        device: String,
        #[arg(long)]
        memdump: bool,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Register a collector generated outside of Helium
    Import {
        case: String,
        #[arg(long)]
        arch: String,
        #[arg(long)]
        opsystem: String,
        #[arg(long)]
        fingerprint: String,
        /// File holding the collector secret
        #[arg(long)]
        secret_file: PathBuf,
        /// PEM file holding the collector private key
        #[arg(long)]
        key_file: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
    },
    Secrets {
        case: String,
        collector: String,
        #[arg(long)]
        json: bool,
    },
    /// Print a one-time download URL for the collector executable
    Download {
        case: String,
        collector: String,
    },
    /// Delete a collector (asks for its fingerprint)
    Delete {
        case: String,
        collector: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum CollectionCommands {
    /// Upload a collection archive
    Upload {
        case: String,
        file: PathBuf,
    },
    Edit {
        case: String,
        collection: String,
    },
    /// Delete a collection (asks for its hostname)
    Delete {
        case: String,
        collection: String,
    },
    /// Remove the server-side analysis cache of a collection
    EvictCache {
        case: String,
        collection: String,
    },
    Download {
        case: String,
        collection: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum AnalysisCommands {
    /// Analyzers applicable to a collection and their state
    List {
        case: String,
        collection: String,
        #[arg(long)]
        json: bool,
    },
    Start {
        case: String,
        collection: String,
        analyzer: String,
    },
    Restart {
        case: String,
        collection: String,
        analyzer: String,
    },
    Log {
        case: String,
        collection: String,
        analyzer: String,
    },
    Download {
        case: String,
        collection: String,
        analyzer: String,
    },
}
