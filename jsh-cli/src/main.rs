//! jsh CLI: inspect `#[jsh]` tags and check JSON:API request documents.
//!
//! ```bash
//! jsh tag "one,create/required,update"
//! jsh check --action create request.json
//! ```
//!
//! See `jsh --help` for all available commands and options.

mod commands;
mod models;

use clap::{Parser, Subcommand};
use jsh_core::Action;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jsh", about = "JSON:API attribute and relationship validation tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a field tag and print its relationship kind and directives
    Tag {
        /// Raw tag, e.g. "create/required,update"
        tag: String,
    },

    /// Validate a request document against a built-in sample model
    Check {
        /// Action the document is processed for (create or update)
        #[arg(long, default_value = "create")]
        action: Action,

        /// Configuration file (defaults to ./jsh.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path to the JSON:API document, `{"data": {...}}`
        document: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tag { tag } => commands::tag::run(&tag).map(|json| {
            println!("{}", json);
            true
        }),
        Commands::Check { action, config, document } => {
            commands::check::run(action, config.as_deref(), &document).map(|report| report.print())
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
