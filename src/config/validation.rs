use std::path::Path;
use url::Url;
use crate::error::{Result, KaraokeError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an http(s) URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            KaraokeError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(KaraokeError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(KaraokeError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate database file extension
    pub fn validate_db_path(path: &Path) -> Result<()> {
        match path.extension() {
            Some(ext) if ext == "db" || ext == "sqlite" || ext == "sqlite3" => Ok(()),
            _ => Err(KaraokeError::Validation(format!(
                "Database file should have .db, .sqlite, or .sqlite3 extension, got: {}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("https://catalog.example.com", "catalog").is_ok());
        assert!(ConfigValidator::validate_url("http://localhost:8080", "catalog").is_ok());
        assert!(ConfigValidator::validate_url("not-a-url", "catalog").is_err());
        assert!(ConfigValidator::validate_url("ftp://example.com", "catalog").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(ConfigValidator::validate_range(5u64, 1u64, 10u64, "test").is_ok());
        assert!(ConfigValidator::validate_range(15u64, 1u64, 10u64, "test").is_err());
        assert!(ConfigValidator::validate_range(0u64, 1u64, 10u64, "test").is_err());
    }

    #[test]
    fn test_validate_db_path() {
        assert!(ConfigValidator::validate_db_path(&PathBuf::from("lyrics.db")).is_ok());
        assert!(ConfigValidator::validate_db_path(&PathBuf::from("lyrics.sqlite")).is_ok());
        assert!(ConfigValidator::validate_db_path(&PathBuf::from("lyrics.sqlite3")).is_ok());
        assert!(ConfigValidator::validate_db_path(&PathBuf::from("lyrics.txt")).is_err());
        assert!(ConfigValidator::validate_db_path(&PathBuf::from("lyrics")).is_err());
    }
}
