use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

const DEFAULT_CATALOG_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Offline lyrics database file
    pub database_path: PathBuf,

    /// Remote songs/lyrics catalog base URL
    pub catalog_url: String,

    /// API key sent to the catalog (optional)
    pub api_key: Option<String>,

    /// Per-request timeout for catalog calls
    pub request_timeout_seconds: u64,

    /// Number of entries shown for the top charts
    pub chart_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        let default_data_path = match ProjectDirs::from("net", "karaoke", "karaoke-cli") {
            Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
            None => {
                warn!("ProjectDirs unavailable; falling back to current directory for data path");
                PathBuf::from(".")
            }
        };

        Self {
            database_path: default_data_path.join("lyrics.db"),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_key: None,
            request_timeout_seconds: 10,
            chart_size: 100,
        }
    }
}

impl Config {
    /// Defaults, then the config file, then `.env` and the process environment.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_file = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path()?,
        };

        let mut config = if config_file.exists() {
            debug!("Reading config from {}", config_file.display());
            let content = fs::read_to_string(&config_file).map_err(|source| ConfigError::Io {
                path: config_file.clone(),
                source,
            })?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Written before env overrides so per-run values never reach the file
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            config.save(&config_file)?;
        }

        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Override fields from `KARAOKE_*` environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(path) = EnvParser::parse_path(EnvVars::DATABASE_PATH)? {
            self.database_path = path;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::CATALOG_URL)? {
            self.catalog_url = url;
        }

        if let Some(key) = EnvParser::parse_string(EnvVars::API_KEY)? {
            self.api_key = Some(key);
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECONDS, 1, 300)? {
            self.request_timeout_seconds = timeout;
        }

        if let Some(size) = EnvParser::parse_usize(EnvVars::CHART_SIZE, 1, 1000)? {
            self.chart_size = size;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.catalog_url, "catalog")?;
        ConfigValidator::validate_db_path(&self.database_path)?;
        ConfigValidator::validate_range(self.request_timeout_seconds, 1, 300, "request timeout seconds")?;
        ConfigValidator::validate_range(self.chart_size, 1, 1000, "chart size")?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "karaoke", "karaoke-cli")
            .ok_or(ConfigError::NoProjectDirs { what: "config" })?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Look up a single setting by its TOML key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "database_path" => self.database_path.display().to_string(),
            "catalog_url" => self.catalog_url.clone(),
            "api_key" => match self.api_key {
                Some(_) => "<set>".to_string(),
                None => "<unset>".to_string(),
            },
            "request_timeout_seconds" => self.request_timeout_seconds.to_string(),
            "chart_size" => self.chart_size.to_string(),
            _ => {
                return Err(ConfigError::UnknownKey { key: key.to_string() }.into());
            }
        };
        Ok(value)
    }

    pub const KEYS: [&'static str; 5] = [
        "database_path",
        "catalog_url",
        "api_key",
        "request_timeout_seconds",
        "chart_size",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KaraokeError;
    use std::env as std_env;
    use std::sync::Mutex;

    // Tests that touch KARAOKE_* variables share the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chart_size, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_then_env_override() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = std_env::temp_dir().join(format!("karaoke-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("config.toml");
        fs::write(
            &file,
            format!(
                "database_path = \"{}\"\ncatalog_url = \"https://file.example.com\"\nchart_size = 25\n",
                dir.join("offline.db").display()
            ),
        )
        .unwrap();

        let from_file = Config::load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(from_file.catalog_url, "https://file.example.com");
        assert_eq!(from_file.chart_size, 25);
        assert_eq!(from_file.request_timeout_seconds, 10);

        std_env::set_var(EnvVars::CATALOG_URL, "https://env.example.com");
        std_env::set_var(EnvVars::CHART_SIZE, "5000");
        let out_of_range = Config::load(Some(file.to_str().unwrap()));
        assert!(matches!(out_of_range, Err(KaraokeError::Validation(_))));

        std_env::set_var(EnvVars::CHART_SIZE, "10");
        let from_env = Config::load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(from_env.catalog_url, "https://env.example.com");
        assert_eq!(from_env.chart_size, 10);

        std_env::remove_var(EnvVars::CATALOG_URL);
        std_env::remove_var(EnvVars::CHART_SIZE);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_env_api_key_is_not_written_to_new_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = std_env::temp_dir().join(format!("karaoke-config-secret-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let file = dir.join("config.toml");

        std_env::set_var(EnvVars::API_KEY, "s3cret-token");
        let with_env = Config::load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(with_env.api_key.as_deref(), Some("s3cret-token"));

        let written = fs::read_to_string(&file).unwrap();
        assert!(!written.contains("s3cret-token"));

        std_env::remove_var(EnvVars::API_KEY);
        let without_env = Config::load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(without_env.api_key, None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = Config::default();
        for key in Config::KEYS {
            assert!(config.get(key).is_ok());
        }
        assert_eq!(config.get("api_key").unwrap(), "<unset>");
        assert!(matches!(
            config.get("nope"),
            Err(KaraokeError::Config(ConfigError::UnknownKey { .. }))
        ));
    }
}
