//! `tui` subcommand.

use canvas_dashboard::config::Config;
use canvas_dashboard::storage::{FileStore, LayoutStore};
use canvas_dashboard::tui::App;
use std::process::ExitCode;

/// Builds the app from `config` and runs it on a tokio runtime.
pub(crate) fn run_tui_command(config: &Config) -> ExitCode {
    let store = LayoutStore::with_key(FileStore::new(config.storage.dir()), &config.storage.key);
    let mut app = match App::from_config(config, store) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = rt.block_on(app.run()) {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
