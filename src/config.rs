//! Configuration management for the Digital Rolodex.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the working directory. Every setting has a default, so an empty
//! environment yields a usable configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::services::SearchMode;
use crate::storage::LoadPolicy;
use std::env;
use std::path::PathBuf;

/// Configuration for the Rolodex CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON contacts file (default: "contacts.json")
    pub contacts_file: PathBuf,

    /// Log level used when `RUST_LOG` is unset (default: "warn")
    pub log_level: String,

    /// Days ahead to look for birthdays (default: 30)
    pub birthday_window_days: u32,

    /// Match mode used by the search menu (default: substring)
    pub search_mode: SearchMode,

    /// How strictly records are checked on load (default: lenient)
    pub load_policy: LoadPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ROLODEX_FILE`: contacts file path (default: "contacts.json")
    /// - `LOG_LEVEL`: logging level (default: "warn")
    /// - `BIRTHDAY_WINDOW_DAYS`: reminder window, 0-366 (default: 30)
    /// - `SEARCH_MODE`: "substring" or "exact" (default: "substring")
    /// - `REQUIRE_EMAIL_ON_LOAD`: skip stored records without email (default: false)
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let contacts_file = env::var("ROLODEX_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.contacts_file);

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let birthday_window_days =
            Self::parse_env_u32("BIRTHDAY_WINDOW_DAYS", defaults.birthday_window_days)?;
        if birthday_window_days > 366 {
            return Err(ConfigError::InvalidValue {
                var: "BIRTHDAY_WINDOW_DAYS".to_string(),
                reason: "Must be between 0 and 366".to_string(),
            });
        }

        let search_mode = match env::var("SEARCH_MODE") {
            Ok(val) => val
                .parse::<SearchMode>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "SEARCH_MODE".to_string(),
                    reason,
                })?,
            Err(_) => defaults.search_mode,
        };

        let load_policy = if Self::parse_env_bool("REQUIRE_EMAIL_ON_LOAD", false)? {
            LoadPolicy::RequireEmail
        } else {
            LoadPolicy::Lenient
        };

        Ok(Config {
            contacts_file,
            log_level,
            birthday_window_days,
            search_mode,
            load_policy,
        })
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contacts_file: PathBuf::from("contacts.json"),
            log_level: "warn".to_string(),
            birthday_window_days: 30,
            search_mode: SearchMode::Substring,
            load_policy: LoadPolicy::Lenient,
        }
    }
}
