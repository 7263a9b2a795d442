//! Default configuration template and file creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Canvas Dashboard Configuration
#
# All values below are the built-in defaults. Remove or change any of them.
#
# Location: $XDG_CONFIG_HOME/canvas-dashboard/config.toml

# ==============================================================================
# Canvas
# ==============================================================================

[canvas]

# Occupancy grid cell size, in canvas units.
# New widgets are placed at the first free multiple of this value,
# scanning left to right, then top to bottom.
cell_size = 50.0

# Where a new widget goes when the canvas has no free space left.
# It may overlap other widgets there.
fallback_origin = { x = 20.0, y = 20.0 }

# Canvas size used by `cdash add` and other headless commands.
# The terminal UI uses the terminal size instead.
container = { width = 1200.0, height = 600.0 }

# Size of newly added widgets.
default_widget_size = { width = 300.0, height = 200.0 }

# Per-kind size overrides.
# Kinds: "chart", "summary", "instructions", "notes", "todo"
# Example:
#   chart = { width = 600.0, height = 400.0 }
[canvas.widget_sizes]

# ==============================================================================
# Interaction
# ==============================================================================

[interaction]

# Smallest size a widget can be resized to.
# This wins over the canvas edge if the two conflict.
min_width = 200.0
min_height = 150.0

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory holding the saved layout. Empty means
# $XDG_DATA_HOME/canvas-dashboard (~/.local/share/canvas-dashboard).
dir = ""

# Name of the saved layout. Stored as <dir>/<key>.json.
key = "dashboard-layout"

# ==============================================================================
# Terminal UI
# ==============================================================================

[tui]

# Redraw interval as a human-readable duration.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# Canvas units covered by one terminal column and one terminal row.
# Smaller values make widgets appear larger on screen.
column_width = 10.0
row_height = 25.0

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Options: "error", "warn", "info", "debug", "trace"
# The CDASH_LOG environment variable overrides this.
level = "info"

# Log file path. Empty means stderr for CLI commands and
# $XDG_DATA_HOME/canvas-dashboard/cdash.log for the terminal UI.
file = ""
"#;

/// Writes the default config to the XDG config path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ConfigError::WriteError { path, source }
    };

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(write_err(&backup_path))?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_err(path))?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err(path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err(path))?;
    }

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
