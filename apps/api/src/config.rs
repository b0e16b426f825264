use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional stopword override (JSON array of strings). Embedded English list when unset.
    pub stopwords_path: Option<PathBuf>,
    pub max_resumes: usize,
    pub max_top_n: usize,
    pub default_top_n: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            stopwords_path: None,
            max_resumes: 10,
            max_top_n: 10,
            default_top_n: 3,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            stopwords_path: std::env::var("STOPWORDS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_resumes: env_or("MAX_RESUMES", defaults.max_resumes)?,
            max_top_n: env_or("MAX_TOP_N", defaults.max_top_n)?,
            default_top_n: env_or("DEFAULT_TOP_N", defaults.default_top_n)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.max_resumes >= 1, "MAX_RESUMES must be at least 1");
        anyhow::ensure!(self.max_top_n >= 1, "MAX_TOP_N must be at least 1");
        anyhow::ensure!(
            (1..=self.max_top_n).contains(&self.default_top_n),
            "DEFAULT_TOP_N must be between 1 and MAX_TOP_N ({})",
            self.max_top_n
        );
        Ok(())
    }

    /// Clamps a requested result-set size to `1..=max_top_n`.
    pub fn clamp_top_n(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_top_n)
            .clamp(1, self.max_top_n)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_clamp_top_n_uses_default_when_absent() {
        let config = Config::default();
        assert_eq!(config.clamp_top_n(None), 3);
    }

    #[test]
    fn test_clamp_top_n_bounds() {
        let config = Config::default();
        assert_eq!(config.clamp_top_n(Some(0)), 1);
        assert_eq!(config.clamp_top_n(Some(7)), 7);
        assert_eq!(config.clamp_top_n(Some(100)), 10);
    }

    #[test]
    fn test_default_top_n_above_max_is_rejected() {
        let config = Config {
            default_top_n: 11,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: usize = env_or("RESUME_RANKER_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
