//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, SplitmateError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_ledger_config(&settings.ledger)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SplitmateError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(SplitmateError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SplitmateError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SplitmateError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SplitmateError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    if config.directory.is_empty() {
        return Err(SplitmateError::Config(
            "Log directory is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate ledger configuration
fn validate_ledger_config(config: &super::LedgerConfig) -> Result<()> {
    if config.currency_scale == 0 || config.currency_scale > 4 {
        return Err(SplitmateError::Config(
            "Currency scale must be between 1 and 4 decimal places".to_string(),
        ));
    }

    if config.max_participants == 0 {
        return Err(SplitmateError::Config(
            "Max participants must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn empty_database_url_rejected() {
        let mut settings = Settings::default();
        settings.database.url.clear();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn connection_bounds_checked() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        settings.database.max_connections = 10;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn unknown_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn zero_currency_scale_rejected() {
        let mut settings = Settings::default();
        settings.ledger.currency_scale = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
