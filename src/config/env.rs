use std::env;
use std::path::PathBuf;
use crate::error::{Result, KaraokeError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const DATABASE_PATH: &'static str = "KARAOKE_DATABASE_PATH";
    pub const CATALOG_URL: &'static str = "KARAOKE_CATALOG_URL";
    pub const API_KEY: &'static str = "KARAOKE_API_KEY";
    pub const REQUEST_TIMEOUT_SECONDS: &'static str = "KARAOKE_REQUEST_TIMEOUT_SECONDS";
    pub const CHART_SIZE: &'static str = "KARAOKE_CHART_SIZE";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as a trimmed, non-empty string
    pub fn parse_string(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(KaraokeError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name)?.map(PathBuf::from))
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                KaraokeError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(KaraokeError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as usize with range validation
    pub fn parse_usize(var_name: &str, min: usize, max: usize) -> Result<Option<usize>> {
        Ok(Self::parse_u64(var_name, min as u64, max as u64)?.map(|v| v as usize))
    }
}
