//! Git Tool CLI - Command line interface for Git Tool
//!
//! Keeps your development directory organised by hosting service, and
//! finds repositories from whatever fragment of their name you remember.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gt_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    BranchArgs, BranchesArgs, CloneArgs, InfoArgs, ListArgs, NewArgs, ScratchArgs, Session,
};

/// Git Tool: manage your development directory
#[derive(Parser, Debug)]
#[command(name = "gt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Development directory (overrides config and env)
    #[arg(short, long, global = true)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List repositories in your development directory
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show details about a repository
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Create a new repository
    #[command(visible_alias = "n")]
    New(NewArgs),

    /// Clone a repository from its hosting service
    Clone(CloneArgs),

    /// Create or find a scratchpad
    Scratch(ScratchArgs),

    /// Switch the current repository to a branch
    #[command(visible_alias = "b")]
    Branch(BranchArgs),

    /// List the branches of a repository
    Branches(BranchesArgs),

    /// List configured hosting services
    Services,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<gt_core::Error>() {
            Some(e) if e.is_user_error() => {
                eprintln!("{}", e);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:?}", err);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_with_overrides(cli.directory.clone())?;

    tracing::debug!(
        directory = %config.dev_directory().display(),
        scratchpads = %config.scratch_directory().display(),
        services = config.services().len(),
        "Configuration loaded"
    );

    let session = Session::new(config);

    match cli.command {
        Some(Commands::List(args)) => args.execute(&session)?,
        Some(Commands::Info(args)) => args.execute(&session)?,
        Some(Commands::New(args)) => args.execute(&session).await?,
        Some(Commands::Clone(args)) => args.execute(&session).await?,
        Some(Commands::Scratch(args)) => args.execute(&session).await?,
        Some(Commands::Branch(args)) => args.execute(&session).await?,
        Some(Commands::Branches(args)) => args.execute(&session)?,
        Some(Commands::Services) => {
            for (i, service) in session.config().services().iter().enumerate() {
                let default = if i == 0 { " (default)" } else { "" };
                println!("{} [{}]{}", service.domain, service.pattern, default);
            }
        }
        Some(Commands::Config) => {
            let config = session.config();
            println!("Git Tool Configuration");
            println!("======================");
            println!();
            println!("  directory: {}", config.dev_directory().display());
            println!("  scratchpads: {}", config.scratch_directory().display());
            println!("  services: {}", config.services().len());
            println!("  aliases: {}", config.aliases.len());
            println!();
            println!("Features:");
            println!("  native_clone: {}", config.features.native_clone);
            println!("  create_remote: {}", config.features.create_remote);
            println!("  http_transport: {}", config.features.http_transport);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Git Tool - manage your development directory");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
