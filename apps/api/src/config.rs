use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::resume::validation::ValidationPolicy;
use crate::storage::check_key;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub bind_addr: String,
    pub port: u16,
    pub rust_log: String,
    pub require_experience: bool,
    pub require_education: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: PathBuf::from(env_or("DATA_DIR", "./data")),
            storage_key: storage_key(env_or("STORAGE_KEY", "ats-resume-data"))?,
            bind_addr: env_or("BIND_ADDR", "127.0.0.1"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            require_experience: env_flag("REQUIRE_EXPERIENCE")?,
            require_education: env_flag("REQUIRE_EDUCATION")?,
        })
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            require_experience: self.require_experience,
            require_education: self.require_education,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The key becomes a file name in the data directory.
fn storage_key(raw: String) -> Result<String> {
    check_key(&raw).context("STORAGE_KEY may only contain letters, digits, '.', '_' and '-'")?;
    Ok(raw)
}

fn env_flag(key: &str) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).with_context(|| format!("{key} must be a boolean")),
        Err(_) => Ok(false),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(parse_flag(" yes ").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(!parse_flag("").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_storage_key_is_checked() {
        assert_eq!(storage_key("ats-resume-data".into()).unwrap(), "ats-resume-data");
        for bad in ["my/key", "", ".hidden", "../data", "a b"] {
            assert!(storage_key(bad.into()).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_validation_policy_from_flags() {
        let config = Config {
            data_dir: PathBuf::from("./data"),
            storage_key: "ats-resume-data".into(),
            bind_addr: "127.0.0.1".into(),
            port: 8080,
            rust_log: "info".into(),
            require_experience: true,
            require_education: false,
        };
        assert_eq!(
            config.validation_policy(),
            ValidationPolicy {
                require_experience: true,
                require_education: false,
            }
        );
    }
}
