//! Application configuration loaded from a TOML file.
//!
//! Lookup order for the file: an explicit path, then `WEEK_CALENDAR_CONFIG`,
//! then `config.toml` in the platform config directory. A missing file means
//! defaults. `PORT` and `WEEK_CALENDAR_DB` override the file afterwards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{GridWindow, GridWindowError};
use crate::models::event::{is_hex_color, DEFAULT_EVENT_COLOR};

pub const CONFIG_ENV: &str = "WEEK_CALENDAR_CONFIG";
pub const DATABASE_ENV: &str = "WEEK_CALENDAR_DB";
pub const PORT_ENV: &str = "PORT";

const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "calendar.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    GridWindow(#[from] GridWindowError),
    #[error("first_day_of_week must be between 0 and 6, got {0}")]
    FirstDayOfWeek(u8),
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),
    #[error("default_color '{0}' is not a hex color")]
    InvalidColor(String),
    #[error("cors_origin must name a single origin; '*' cannot be combined with credentials")]
    WildcardCorsOrigin,
    #[error("{name} must be a port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub grid_start_hour: u32,
    pub grid_end_hour: u32,
    /// 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u8,
    /// IANA zone name; UTC when absent.
    pub timezone: Option<String>,
    pub default_color: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            grid_start_hour: 0,
            grid_end_hour: 24,
            first_day_of_week: 1,
            timezone: None,
            default_color: DEFAULT_EVENT_COLOR.to_string(),
        }
    }
}

impl CalendarConfig {
    pub fn grid_window(&self) -> Result<GridWindow, ConfigError> {
        Ok(GridWindow::new(self.grid_start_hour, self.grid_end_hour)?)
    }

    pub fn time_zone(&self) -> Result<Tz, ConfigError> {
        match &self.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimeZone(name.clone())),
            None => Ok(Tz::UTC),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub calendar: CalendarConfig,
}

impl AppConfig {
    /// Resolve, read, override and validate the configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort {
                name: PORT_ENV,
                value: port.clone(),
            })?;
        }
        if let Some(db) = std::env::var_os(DATABASE_ENV) {
            self.database.path = Some(PathBuf::from(db));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.cors_origin.trim() == "*" {
            return Err(ConfigError::WildcardCorsOrigin);
        }
        self.calendar.grid_window()?;
        if self.calendar.first_day_of_week > 6 {
            return Err(ConfigError::FirstDayOfWeek(self.calendar.first_day_of_week));
        }
        self.calendar.time_zone()?;
        if !is_hex_color(&self.calendar.default_color) {
            return Err(ConfigError::InvalidColor(
                self.calendar.default_color.clone(),
            ));
        }
        Ok(())
    }

    /// Configured database path, or `calendar.db` in the platform data
    /// directory, or the working directory as a last resort.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database.path {
            return path.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "WeekCalendar", "WeekCalendar")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_env() {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(DATABASE_ENV);
        std::env::remove_var(PORT_ENV);
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.calendar.grid_window().unwrap(), GridWindow::full_day());
        assert_eq!(config.calendar.time_zone().unwrap(), Tz::UTC);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [calendar]
            grid_start_hour = 7
            grid_end_hour = 19
            timezone = "America/New_York"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.calendar.first_day_of_week, 1);
        assert_eq!(config.calendar.grid_window().unwrap().start_hour(), 7);
        assert_eq!(
            config.calendar.time_zone().unwrap(),
            chrono_tz::America::New_York
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.calendar.grid_start_hour = 20;
        config.calendar.grid_end_hour = 8;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridWindow(GridWindowError::Empty { .. }))
        ));

        let mut config = AppConfig::default();
        config.calendar.first_day_of_week = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FirstDayOfWeek(7))
        ));

        let mut config = AppConfig::default();
        config.calendar.timezone = Some("Mars/Olympus_Mons".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTimeZone(_))
        ));

        let mut config = AppConfig::default();
        config.calendar.default_color = "blue".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidColor(_))));

        let mut config = AppConfig::default();
        config.server.cors_origin = "*".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WildcardCorsOrigin)
        ));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml("[server\nport = 1").is_err());
        assert!(AppConfig::from_toml("[server]\nport = \"high\"").is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_explicit_path() {
        clear_env();
        let file = write_config("[database]\npath = \"/tmp/events.db\"\n");

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/events.db"));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        let file = write_config("[server]\nport = 8080\n");
        std::env::set_var(CONFIG_ENV, file.path());
        std::env::set_var(PORT_ENV, "9090");
        std::env::set_var(DATABASE_ENV, "/var/lib/calendar.db");

        let config = AppConfig::load(None);
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/calendar.db"));
    }

    #[test]
    #[serial]
    fn test_invalid_port_env_is_rejected() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(PORT_ENV, "not-a-port");

        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        clear_env();

        assert!(result.is_err());
    }
}
