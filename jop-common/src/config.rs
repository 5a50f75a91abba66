//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority, with environment fallback via clap)
//! 2. TOML config file
//! 3. Compiled defaults (fallback)
//!
//! A missing or unreadable TOML file never stops startup; it is logged and
//! the compiled defaults are used instead.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port for jop-api
pub const DEFAULT_PORT: u16 = 5000;

/// Config file looked up in the working directory when none is given
pub const LOCAL_CONFIG_FILE: &str = "jop.toml";

/// Raw input file names inside the data directory
pub const EPISODE_DATES_FILE: &str = "episodes.txt";
pub const COLORS_FILE: &str = "colors.csv";
pub const SUBJECTS_FILE: &str = "subjects.csv";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    /// Path to the SQLite document store
    pub database_path: PathBuf,

    /// Directory holding the three raw input files
    pub data_dir: PathBuf,

    /// Per-file overrides; each defaults to `data_dir/<name>`
    pub episode_dates_file: Option<PathBuf>,
    pub colors_file: Option<PathBuf>,
    pub subjects_file: Option<PathBuf>,

    /// HTTP bind address for jop-api
    pub host: String,
    pub port: u16,

    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data").join("joy_of_painting.db"),
            data_dir: PathBuf::from("data").join("raw"),
            episode_dates_file: None,
            colors_file: None,
            subjects_file: None,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values supplied on the command line (or their environment fallbacks)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults on any problem
    ///
    /// `explicit` is the `--config` path; without it `./jop.toml` and then
    /// the per-user config directory are tried.
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = locate_config_file(explicit) else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring invalid config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.database_path {
            self.database_path = path;
        }
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        self
    }

    /// Resolve the three raw input paths
    pub fn data_files(&self) -> DataFiles {
        let resolve = |explicit: &Option<PathBuf>, name: &str| {
            explicit
                .clone()
                .unwrap_or_else(|| self.data_dir.join(name))
        };

        DataFiles {
            episode_dates: resolve(&self.episode_dates_file, EPISODE_DATES_FILE),
            colors: resolve(&self.colors_file, COLORS_FILE),
            subjects: resolve(&self.subjects_file, SUBJECTS_FILE),
        }
    }
}

fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        // An explicit path is returned even if missing so the read error is logged
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("joy-of-painting").join("config.toml"))
        .filter(|p| p.exists())
}

/// Locations of the three raw sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    /// Line-oriented `"Title" (Month D, YYYY)` file
    pub episode_dates: PathBuf,
    /// Color usage table
    pub colors: PathBuf,
    /// Subject flag table
    pub subjects: PathBuf,
}

impl DataFiles {
    pub fn all(&self) -> [&Path; 3] {
        [&self.episode_dates, &self.colors, &self.subjects]
    }

    /// File names of inputs that do not exist
    pub fn missing(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|p| !p.exists())
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect()
    }
}
