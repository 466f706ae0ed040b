mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    compose, editing, init, sanitize, storage, ComposeArgs, EditingArgs, InitArgs, SanitizeArgs,
    StorageArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagekit CLI - Responsive page documents between storage and editing form
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log transform details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config and an example schema
    Init(InitArgs),

    /// Resolve a stored document for one breakpoint and sanitize it
    Editing(EditingArgs),

    /// Fold an edited document back into storage form
    Storage(StorageArgs),

    /// Trim a document to the schema and fill defaults
    Sanitize(SanitizeArgs),

    /// Compose root fragments into one root schema
    Compose(ComposeArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Editing(args) => editing(args, &cwd),
            Command::Storage(args) => storage(args, &cwd),
            Command::Sanitize(args) => sanitize(args, &cwd),
            Command::Compose(args) => compose(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
