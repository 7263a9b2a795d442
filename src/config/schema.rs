//! TOML configuration schema for the canvas dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of the file is valid. Durations are
//! human-readable strings (e.g. `"250ms"`) parsed with `humantime` at the
//! call site.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::geometry::{Point, Size};
use crate::interaction::SizeLimits;
use crate::layout::placement::{DEFAULT_CELL_SIZE, DEFAULT_FALLBACK_ORIGIN};
use crate::layout::{PlacementConfig, WidgetKind, WidgetSizes};
use crate::storage::DEFAULT_LAYOUT_KEY;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// ```toml
/// [canvas]
/// [interaction]
/// [storage]
/// [tui]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Placement grid and widget sizes.
    pub canvas: CanvasConfig,
    /// Resize limits.
    pub interaction: InteractionConfig,
    /// Where the layout is persisted.
    pub storage: StorageConfig,
    /// Terminal host settings.
    pub tui: TuiConfig,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    /// Checks values serde cannot check on its own.
    ///
    /// Returns the first offending field as `ConfigError::Invalid`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas.cell_size", self.canvas.cell_size)?;
        non_negative_point("canvas.fallback_origin", self.canvas.fallback_origin)?;
        positive_size("canvas.container", self.canvas.container)?;
        positive_size("canvas.default_widget_size", self.canvas.default_widget_size)?;
        for (name, size) in &self.canvas.widget_sizes {
            let field = format!("canvas.widget_sizes.{name}");
            name.parse::<WidgetKind>().map_err(|e| invalid(&field, e.to_string()))?;
            positive_size(&field, *size)?;
        }
        non_negative("interaction.min_width", self.interaction.min_width)?;
        non_negative("interaction.min_height", self.interaction.min_height)?;
        if self.storage.key.is_empty() || self.storage.key.contains(['/', '\\']) {
            return Err(invalid(
                "storage.key",
                format!("'{}' is not usable as a file name", self.storage.key),
            ));
        }
        self.tui.tick_rate()?;
        positive("tui.column_width", self.tui.column_width)?;
        positive("tui.row_height", self.tui.row_height)?;
        Ok(())
    }

    /// Placement search settings.
    pub fn placement(&self) -> PlacementConfig {
        PlacementConfig {
            cell_size: self.canvas.cell_size,
            fallback_origin: self.canvas.fallback_origin,
        }
    }

    /// Default size per kind. Keys that do not name a kind are skipped;
    /// [`validate`](Self::validate) reports them.
    pub fn widget_sizes(&self) -> WidgetSizes {
        self.canvas
            .widget_sizes
            .iter()
            .filter_map(|(name, size)| name.parse::<WidgetKind>().ok().map(|k| (k, *size)))
            .fold(WidgetSizes::new(self.canvas.default_widget_size), |sizes, (kind, size)| {
                sizes.with_override(kind, size)
            })
    }

    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            min_width: self.interaction.min_width,
            min_height: self.interaction.min_height,
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be zero or positive, got {value}")))
    }
}

fn positive_size(field: &str, size: Size) -> Result<(), ConfigError> {
    positive(&format!("{field}.width"), size.width)?;
    positive(&format!("{field}.height"), size.height)
}

fn non_negative_point(field: &str, point: Point) -> Result<(), ConfigError> {
    non_negative(&format!("{field}.x"), point.x)?;
    non_negative(&format!("{field}.y"), point.y)
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Layout engine settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    /// Occupancy grid cell size in canvas units.
    pub cell_size: f64,
    /// Origin used when no free space is found.
    pub fallback_origin: Point,
    /// Container size for headless commands (`cdash add`). The TUI derives
    /// its container from the terminal size instead.
    pub container: Size,
    /// Size of newly added widgets.
    pub default_widget_size: Size,
    /// Per-kind overrides of `default_widget_size`, keyed by kind name.
    pub widget_sizes: BTreeMap<String, Size>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            fallback_origin: DEFAULT_FALLBACK_ORIGIN,
            container: Size::new(1200.0, 600.0),
            default_widget_size: WidgetSizes::DEFAULT,
            widget_sizes: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Smallest width a resize can produce.
    pub min_width: f64,
    /// Smallest height a resize can produce.
    pub min_height: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        let limits = SizeLimits::default();
        Self {
            min_width: limits.min_width,
            min_height: limits.min_height,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `<key>.json`. Empty string means the XDG data dir.
    pub dir: String,
    /// Key the layout is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            key: DEFAULT_LAYOUT_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolved storage directory, with `~` expanded.
    pub fn dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(&self.dir)
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal host settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Redraw interval as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// Canvas units per terminal column.
    pub column_width: f64,
    /// Canvas units per terminal row.
    pub row_height: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            column_width: 10.0,
            row_height: 25.0,
        }
    }
}

impl TuiConfig {
    /// Parsed `tick_rate`. Zero is rejected since it would spin the loop.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        let rate = humantime::parse_duration(&self.tick_rate)
            .map_err(|e| invalid("tui.tick_rate", format!("'{}': {e}", self.tick_rate)))?;
        if rate.is_zero() {
            return Err(invalid("tui.tick_rate", "must be greater than zero"));
        }
        Ok(rate)
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `CDASH_LOG` is unset.
    pub level: LogLevel,
    /// Log file path. Empty string means stderr (the TUI falls back to a
    /// file in the data dir instead).
    pub file: String,
}

impl LogConfig {
    /// Configured log file, with `~` expanded.
    pub fn file(&self) -> Option<PathBuf> {
        (!self.file.is_empty()).then(|| xdg::expand_tilde(&self.file))
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
