//! `config` subcommand: init, path and validate.

use crate::ConfigAction;
use canvas_dashboard::config::{default, xdg, ConfigLoader};
use std::path::Path;
use std::process::ExitCode;

/// Runs a config action against `explicit` or the XDG config path.
pub(crate) fn run_config_command(action: ConfigAction, explicit: Option<&Path>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => {
            let created = match explicit {
                Some(path) => {
                    default::create_default_config_at(path, force).map(|_| path.to_path_buf())
                }
                None => default::create_default_config(force),
            };
            created.map(|path| println!("Created configuration at {}", path.display()))
        }
        ConfigAction::Path => {
            let path = explicit.map_or_else(xdg::config_path, Path::to_path_buf);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(explicit).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}
