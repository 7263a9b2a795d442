//! Canvas dashboard - CLI entry point
//!
//! Runs the interactive terminal canvas, or edits the persisted layout
//! headlessly from scripts.

use canvas_dashboard::config::{ConfigLoader, LogLevel};
use canvas_dashboard::geometry::Size;
use canvas_dashboard::layout::WidgetKind;
use canvas_dashboard::logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[cfg(test)]
mod cli_tests;

/// Widget canvas with drag, resize and first-fit placement
#[derive(Parser)]
#[command(name = "cdash")]
#[command(version, about = "Customizable widget canvas in the terminal")]
struct Cli {
    /// Configuration file (defaults to the XDG config path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the cdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal canvas
    Tui,

    /// Print the widgets of the saved layout
    List {
        /// Print the raw stored JSON format
        #[arg(long)]
        json: bool,
    },

    /// Add a widget at the first free position (no-op if the kind is present)
    Add {
        /// Widget kind: chart, summary, instructions, notes, todo
        kind: WidgetKind,
        /// Container size used for placement, as WIDTHxHEIGHT
        #[arg(long)]
        container: Option<Size>,
    },

    /// Remove a widget by id (no-op if absent)
    Remove {
        /// Widget id
        id: String,
    },

    /// Restore the default layout
    Reset,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config commands must work even when the file is broken.
    if let Commands::Config { action } = cli.command {
        let _ = logging::init(LogLevel::Warn, None);
        return commands::run_config_command(action, cli.config.as_deref());
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = match cli.command {
        Commands::Tui => Some(
            config
                .log
                .file()
                .unwrap_or_else(canvas_dashboard::config::xdg::log_path),
        ),
        _ => config.log.file(),
    };
    if let Err(e) = logging::init(config.log.level, log_file.as_deref()) {
        eprintln!("Error: failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Commands::Tui => commands::run_tui_command(&config),
        Commands::List { json } => commands::run_list_command(&config, json),
        Commands::Add { kind, container } => commands::run_add_command(&config, kind, container),
        Commands::Remove { id } => commands::run_remove_command(&config, &id),
        Commands::Reset => commands::run_reset_command(&config),
        // handled above
        Commands::Config { .. } => ExitCode::SUCCESS,
    }
}
