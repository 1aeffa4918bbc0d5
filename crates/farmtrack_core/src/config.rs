//! Runtime configuration loaded from `farmtrack.toml`.
//!
//! # Responsibility
//! - Parse and validate user configuration.
//! - Provide defaults for every setting so a missing file is not an error.
//!
//! # Invariants
//! - A loaded config has passed [`FarmConfig::validate`].
//! - Unknown keys are rejected so typos surface early.

use crate::stats::dashboard::DEFAULT_RECENT_LIMIT;
use chrono::FixedOffset;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name looked up by [`FarmConfig::load_from_dir`].
pub const CONFIG_FILE: &str = "farmtrack.toml";

const DEFAULT_DATABASE_PATH: &str = "farmtrack.sqlite3";
const MAX_RECENT_LIMIT: usize = 100;

static OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?i:z|utc)|([+-])(\d{2}):(\d{2}))$").expect("valid utc offset regex")
});

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite file; relative paths resolve against the config file's
    /// directory.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when absent.
    pub level: Option<String>,
    /// Absolute log directory. File logging is off when absent.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub recent_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// `+HH:MM`, `-HH:MM`, `Z` or `UTC`.
    pub utc_offset: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset: "+00:00".to_string(),
        }
    }
}

impl ClockConfig {
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_utc_offset(&self.utc_offset)
            .ok_or_else(|| ConfigError::Invalid(format!("invalid utc_offset `{}`", self.utc_offset)))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

impl FarmConfig {
    /// Loads `dir/farmtrack.toml`, falling back to defaults when it is absent.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            let mut config = Self::default();
            config.resolve_relative_paths(dir.as_ref());
            return Ok(config);
        }
        Self::load(&path)
    }

    /// Loads and validates an explicit config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }
        Ok(config)
    }

    /// Parses and validates TOML text. Relative paths are left as written.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path cannot be empty".into()));
        }
        if let Some(dir) = &self.logging.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        if let Some(level) = &self.logging.level {
            crate::logging::normalize_level(level).map_err(ConfigError::Invalid)?;
        }
        if self.dashboard.recent_limit == 0 || self.dashboard.recent_limit > MAX_RECENT_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "dashboard.recent_limit must be between 1 and {MAX_RECENT_LIMIT}"
            )));
        }
        self.clock.offset()?;
        Ok(())
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        if self.database.path.is_relative() {
            self.database.path = base.join(&self.database.path);
        }
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `Z` or `UTC` into a fixed offset.
pub fn parse_utc_offset(text: &str) -> Option<FixedOffset> {
    let caps = OFFSET_RE.captures(text.trim())?;
    let Some(sign) = caps.get(1) else {
        return FixedOffset::east_opt(0);
    };
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = caps[3].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    let signed = if sign.as_str() == "-" { -seconds } else { seconds };
    FixedOffset::east_opt(signed)
}

#[cfg(test)]
mod tests {
    use super::{parse_utc_offset, FarmConfig};

    #[test]
    fn utc_offset_parsing() {
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-05:30").unwrap().local_minus_utc(), -19800);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("utc").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("+2").is_none());
        assert!(parse_utc_offset("+02:75").is_none());
        assert!(parse_utc_offset("+25:00").is_none());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = FarmConfig::from_toml_str("").unwrap();
        assert_eq!(config, FarmConfig::default());
        assert_eq!(config.dashboard.recent_limit, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FarmConfig::from_toml_str("[dashboard]\nrecent_limt = 3\n").is_err());
    }
}
