//! Converge CLI - fingerprints and structural diffs for resource manifests.

use clap::{Parser, Subcommand};

mod commands;
mod input;
mod logging;
mod output;

use commands::{canonicalize, diff, hash, name};

#[derive(Parser)]
#[command(name = "converge")]
#[command(about = "Resource fingerprints and structural diffs for desired-state convergence")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the content fingerprint of a ConfigMap or Secret
    Hash {
        /// Input JSON/YAML file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the name with its fingerprint suffix appended
    Name {
        /// Input JSON/YAML file (or stdin if not provided)
        input: Option<String>,
    },
    /// Show the structural diff between two documents
    Diff {
        /// Document before the change
        before: String,
        /// Document after the change
        after: String,
        /// Report metadata.generation/resourceVersion-only changes as differences
        #[arg(long)]
        strict: bool,
        /// Additional metadata key whose changes alone are ignored (repeatable)
        #[arg(long = "ignore-metadata", value_name = "KEY")]
        ignore_metadata: Vec<String>,
        /// Exit with status 2 if the documents differ
        #[arg(long)]
        exit_code: bool,
    },
    /// Show the canonical form of a document
    Canonicalize {
        /// Input JSON/YAML file (or stdin if not provided)
        input: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Hash { input, json } => hash::run(input, json),
        Commands::Name { input } => name::run(input),
        Commands::Diff {
            before,
            after,
            strict,
            ignore_metadata,
            exit_code,
        } => diff::run(before, after, strict, ignore_metadata, exit_code),
        Commands::Canonicalize { input } => canonicalize::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
