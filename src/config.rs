//! Service configuration.
//!
//! Loaded from a TOML file (default `aquaalert.toml` in the working
//! directory), then overridden by environment variables (a `.env` file is
//! honoured) and finally by command-line flags. Operator inputs are clamped
//! to their valid ranges here; the risk model does not validate them.
//!
//! ```toml
//! data_dir = "data"
//!
//! [dashboard]
//! rain_mm_6h = 20.0
//! risk_threshold = 0.6
//! simulate_updates = true
//! simulation_seed = 42
//!
//! [logging]
//! level = "info"
//! file = "aquaalert.log"
//! console_timestamps = false
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;
use crate::simulate::DEFAULT_SEED;

pub const DEFAULT_CONFIG_FILE: &str = "aquaalert.toml";

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "AQUAALERT_CONFIG";

/// Environment variable overriding `data_dir`.
pub const ENV_DATA_DIR: &str = "AQUAALERT_DATA_DIR";

/// Operator range for simulated rainfall, mm over 6 hours.
pub const MAX_RAIN_MM: f64 = 300.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Simulated rainfall over the last 6 hours, mm (0..=300).
    pub rain_mm_6h: f64,
    /// Risk score at or above which an alert is raised (0.0..=1.0).
    pub risk_threshold: f64,
    /// Perturb sensor levels every cycle.
    pub simulate_updates: bool,
    pub simulation_seed: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rain_mm_6h: 20.0,
            risk_threshold: 0.6,
            simulate_updates: true,
            simulation_seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file: None, console_timestamps: false }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
    /// Clamp notices raised by `normalize`, drained once a logger is up.
    #[serde(skip)]
    pub notices: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Parse a TOML document. `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.normalize()?;
        Ok(config)
    }

    /// Load configuration for the binary.
    ///
    /// An explicitly named file (argument or `AQUAALERT_CONFIG`) must exist.
    /// The default `aquaalert.toml` is optional; without it, defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(ENV_CONFIG).map(PathBuf::from));

        let mut config = match named {
            Some(path) => Self::read_file(&path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::read_file(default_path)?
                } else {
                    AppConfig::default()
                }
            }
        };

        config.apply_env(env::var(ENV_DATA_DIR).ok());
        config.normalize()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Apply environment overrides. Takes the values rather than reading the
    /// environment so it can be tested without touching process state.
    pub fn apply_env(&mut self, data_dir: Option<String>) {
        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// Apply command-line overrides, then re-clamp.
    pub fn apply_overrides(
        &mut self,
        rain_mm_6h: Option<f64>,
        risk_threshold: Option<f64>,
        no_simulate: bool,
    ) -> Result<(), ConfigError> {
        if let Some(rain) = rain_mm_6h {
            self.dashboard.rain_mm_6h = rain;
        }
        if let Some(threshold) = risk_threshold {
            self.dashboard.risk_threshold = threshold;
        }
        if no_simulate {
            self.dashboard.simulate_updates = false;
        }
        self.normalize()
    }

    /// Clamp operator inputs into range and validate the rest.
    ///
    /// Each clamp is recorded in `notices`; nothing is logged here.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        let d = &mut self.dashboard;

        if d.rain_mm_6h.is_nan() {
            return Err(ConfigError::Invalid { key: "dashboard.rain_mm_6h", value: "NaN".into() });
        }
        if d.risk_threshold.is_nan() {
            return Err(ConfigError::Invalid { key: "dashboard.risk_threshold", value: "NaN".into() });
        }

        let rain = d.rain_mm_6h.clamp(0.0, MAX_RAIN_MM);
        if rain != d.rain_mm_6h {
            self.notices.push(format!("rainfall {} mm clamped to {} mm", d.rain_mm_6h, rain));
            d.rain_mm_6h = rain;
        }

        let threshold = d.risk_threshold.clamp(0.0, 1.0);
        if threshold != d.risk_threshold {
            self.notices
                .push(format!("risk threshold {} clamped to {}", d.risk_threshold, threshold));
            d.risk_threshold = threshold;
        }

        self.log_level()?;
        Ok(())
    }

    /// Take the pending clamp notices, leaving none behind.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        LogLevel::parse(&self.logging.level).ok_or_else(|| ConfigError::Invalid {
            key: "logging.level",
            value: self.logging.level.clone(),
        })
    }

    /// The data directory, `.` when unset.
    pub fn data_dir(&self) -> &Path {
        if self.data_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            &self.data_dir
        }
    }
}
