//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--theme`, `--no-mouse`, `--log-level`)
//! 2. `$FILE_TABLE_CONFIG` environment variable (path to config file)
//! 3. Project-local `.file-table.toml` in the current working directory
//! 4. Global `~/.config/file-table/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data file to open (overridden by CLI positional arg).
    pub data_path: Option<String>,
    /// Enable mouse support.
    pub mouse: Option<bool>,
}

/// Table panel settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TableConfig {
    /// Caption shown in the table border.
    pub caption: Option<String>,
    /// Alternate row backgrounds.
    pub zebra: Option<bool>,
    /// How long status messages stay visible, in milliseconds.
    pub status_timeout_ms: Option<u64>,
}

/// Log file settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a log file at all.
    pub enabled: Option<bool>,
    /// Filter directive, e.g. "info" or "file_table_tui=debug".
    pub level: Option<String>,
    /// Directory for the log file.
    pub dir: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub table_bg: Option<String>,
    pub table_fg: Option<String>,
    pub header_bg: Option<String>,
    pub header_fg: Option<String>,
    pub row_alt_bg: Option<String>,
    pub selected_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub folder_fg: Option<String>,
    pub placeholder_fg: Option<String>,
    pub filter_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
    pub border_focused_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub table: TableConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default table caption.
pub const DEFAULT_CAPTION: &str = "Files";
/// Default status message lifetime in milliseconds.
pub const DEFAULT_STATUS_TIMEOUT_MS: u64 = 3000;
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("FILE_TABLE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".file-table.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("file-table").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            // The log sink is configured from this file, so stderr is all we have.
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                data_path: other
                    .general
                    .data_path
                    .clone()
                    .or(self.general.data_path),
                mouse: other.general.mouse.or(self.general.mouse),
            },
            table: TableConfig {
                caption: other.table.caption.clone().or(self.table.caption),
                zebra: other.table.zebra.or(self.table.zebra),
                status_timeout_ms: other
                    .table
                    .status_timeout_ms
                    .or(self.table.status_timeout_ms),
            },
            logging: LoggingConfig {
                enabled: other.logging.enabled.or(self.logging.enabled),
                level: other.logging.level.clone().or(self.logging.level),
                dir: other.logging.dir.clone().or(self.logging.dir),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Data file from config, if any.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.general.data_path.as_deref().map(PathBuf::from)
    }

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    pub fn caption(&self) -> &str {
        self.table.caption.as_deref().unwrap_or(DEFAULT_CAPTION)
    }

    /// Whether rows alternate background colors.
    pub fn zebra(&self) -> bool {
        self.table.zebra.unwrap_or(true)
    }

    pub fn status_timeout_ms(&self) -> u64 {
        self.table
            .status_timeout_ms
            .unwrap_or(DEFAULT_STATUS_TIMEOUT_MS)
    }

    /// Whether a log file is written.
    pub fn logging_enabled(&self) -> bool {
        self.logging.enabled.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log directory; defaults to `<cache_dir>/file-table/logs`.
    pub fn log_dir(&self) -> PathBuf {
        match self.logging.dir.as_deref() {
            Some(dir) => PathBuf::from(dir),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("file-table")
                .join("logs"),
        }
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
