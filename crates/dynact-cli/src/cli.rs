//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dynact",
    about = "Dynact - dynamic action definition enrichment",
    version,
    author = "Dynact Team"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Manifest with verifier, connectors, connections and schemas
    #[arg(
        short,
        long,
        global = true,
        env = "DYNACT_CONFIG",
        default_value = "./dynact.yaml",
        help = "Path to the YAML or JSON manifest"
    )]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Host and port to bind to
        #[arg(long, env = "DYNACT_ADDR", default_value = "127.0.0.1:8080")]
        addr: String,
    },

    /// Enrich one action for a connection and print the result
    Enrich {
        /// Connection id from the manifest
        connection: String,

        /// Action id, e.g. io.syndesis:salesforce-create-or-update-connector:latest
        action: String,

        /// Values chosen so far, as a JSON object
        #[arg(long, conflicts_with = "values_file")]
        values: Option<String>,

        /// File holding the values as a JSON or YAML object
        #[arg(long)]
        values_file: Option<PathBuf>,

        /// Pretty print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Load the manifest and report what it defines
    Validate,
}
