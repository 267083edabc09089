//! Environment configuration

use std::time::Duration;

use crate::pricing::models::PricingPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://exam-api-courses.std-900.ist.mospolytech.ru";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Service settings
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_key: String,
    pub bind_addr: String,
    pub catalog_cache_ttl: Duration,
    pub http_timeout: Duration,
    pub pricing_policy: PricingPolicy,
}

impl Config {
    /// Read settings from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get("SCHOOL_API_KEY").ok_or(ConfigError::Missing("SCHOOL_API_KEY"))?;
        let api_base_url = get("SCHOOL_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_base_url,
            api_key,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            catalog_cache_ttl: Duration::from_secs(parse_or(
                "CATALOG_CACHE_TTL_SECS",
                get("CATALOG_CACHE_TTL_SECS"),
                DEFAULT_CACHE_TTL_SECS,
            )?),
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            pricing_policy: PricingPolicy {
                early_registration_for_courses: parse_flag(
                    "EARLY_REGISTRATION_FOR_COURSES",
                    get("EARLY_REGISTRATION_FOR_COURSES"),
                    true,
                )?,
                early_registration_for_tutors: parse_flag(
                    "EARLY_REGISTRATION_FOR_TUTORS",
                    get("EARLY_REGISTRATION_FOR_TUTORS"),
                    true,
                )?,
            },
        })
    }
}

fn parse_or(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: v }),
    }
}

fn parse_flag(var: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value: v }),
    }
}
