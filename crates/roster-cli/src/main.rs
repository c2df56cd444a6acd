#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("roster error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    match &cli.command {
        cli::Commands::Init(args) => return commands::init::handle(args, &flags).await,
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        _ => {}
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = bootstrap::load_config(&project_root)?;

    let command = cli.command;
    let _write_lock = match write_label(&command) {
        Some(label) => Some(write_lock::acquire_for_project(&project_root, label).await?),
        None => None,
    };

    let ctx = context::AppContext::init(project_root, config)
        .await
        .context("failed to open the roster project")?;
    commands::dispatch::dispatch(command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ROSTER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == roster_config::PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.roster' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a roster project (no .roster directory found). Run 'roster init' first.")
}

/// Name recorded in the write lock for commands that change the database;
/// `None` for read-only commands.
fn write_label(command: &cli::Commands) -> Option<&'static str> {
    use crate::cli::subcommands::{PairingCommands, StaffCommands};

    match command {
        cli::Commands::Upload(args) if !args.dry_run => Some("upload"),
        cli::Commands::Staff { action } => match action {
            StaffCommands::Add { .. } => Some("staff add"),
            StaffCommands::Import { .. } => Some("staff import"),
            StaffCommands::Activate { .. } => Some("staff activate"),
            StaffCommands::Deactivate { .. } => Some("staff deactivate"),
            StaffCommands::List { .. } => None,
        },
        cli::Commands::Pairing { action } => match action {
            PairingCommands::Assign { .. } => Some("pairing assign"),
            PairingCommands::Release { .. } => Some("pairing release"),
            PairingCommands::Check { .. } | PairingCommands::Mentees { .. } => None,
        },
        _ => None,
    }
}
