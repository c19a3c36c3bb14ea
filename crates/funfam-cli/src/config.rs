//! Configuration management for the FunFam CLI
//!
//! Endpoint, polling and output settings. Values come from defaults, then
//! environment variables, then command-line flags.

use crate::error::{CliError, Result};
use crate::workflow::PollPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default CATH server when FUNFAM_BASE_URL is not set.
pub const DEFAULT_BASE_URL: &str = "http://www.cathdb.info";

/// Seconds between status checks.
pub const DEFAULT_POLL_INTERVAL_SECS: f64 = 1.0;

/// Seconds to wait for a job before giving up. 0 disables the deadline.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 600;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Interpreter used by the script submission fallback.
pub const DEFAULT_SCRIPT_INTERPRETER: &str = "perl";

/// How the submission request is issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubmitStrategy {
    /// POST the sequence with the HTTP client
    #[default]
    Native,
    /// Write a Perl LWP script into the output directory and run it
    Script { interpreter: String },
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service root, e.g. http://www.cathdb.info
    pub base_url: String,

    /// Delay between status checks
    pub poll_interval: Duration,

    /// Give up polling after this long; `None` polls forever
    pub poll_timeout: Option<Duration>,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Where result tables (and the submission script) are written
    pub output_dir: PathBuf,

    #[serde(default)]
    pub submit_strategy: SubmitStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs_f64(DEFAULT_POLL_INTERVAL_SECS),
            poll_timeout: Some(Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS)),
            request_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            output_dir: PathBuf::from("."),
            submit_strategy: SubmitStrategy::Native,
        }
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("FUNFAM_BASE_URL") {
            config.set_base_url(url);
        }

        if let Ok(raw) = std::env::var("FUNFAM_POLL_INTERVAL_SECS") {
            config.poll_interval = parse_interval("FUNFAM_POLL_INTERVAL_SECS", &raw)?;
        }

        if let Ok(raw) = std::env::var("FUNFAM_POLL_TIMEOUT_SECS") {
            config.poll_timeout = timeout_from_secs(parse_secs("FUNFAM_POLL_TIMEOUT_SECS", &raw)?);
        }

        if let Ok(raw) = std::env::var("FUNFAM_API_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_secs("FUNFAM_API_TIMEOUT_SECS", &raw)?);
        }

        if let Ok(dir) = std::env::var("FUNFAM_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Set the base URL, dropping any trailing slash
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into().trim_end_matches('/').to_string();
    }

    /// Set the poll interval from a number of seconds
    pub fn set_poll_interval_secs(&mut self, secs: f64) -> Result<()> {
        self.poll_interval = parse_interval("--poll-interval-secs", &secs.to_string())?;
        Ok(())
    }

    /// Set the poll deadline from a number of seconds; 0 disables it
    pub fn set_poll_timeout_secs(&mut self, secs: u64) {
        self.poll_timeout = timeout_from_secs(secs);
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Switch submission to the script fallback
    pub fn use_script_submission(&mut self, interpreter: impl Into<String>) {
        self.submit_strategy = SubmitStrategy::Script {
            interpreter: interpreter.into(),
        };
    }

    /// Polling behaviour for the workflow
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            timeout: self.poll_timeout,
        }
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_secs(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        CliError::config(format!(
            "{} must be a whole number of seconds, got '{}'",
            name, raw
        ))
    })
}

fn parse_interval(name: &str, raw: &str) -> Result<Duration> {
    let secs: f64 = raw.trim().parse().map_err(|_| {
        CliError::config(format!("{} must be a number of seconds, got '{}'", name, raw))
    })?;

    if !secs.is_finite() || secs <= 0.0 {
        return Err(CliError::config(format!(
            "{} must be greater than zero, got '{}'",
            name, raw
        )));
    }

    Duration::try_from_secs_f64(secs).map_err(|_| {
        CliError::config(format!("{} is too large, got '{}'", name, raw))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "FUNFAM_BASE_URL",
        "FUNFAM_POLL_INTERVAL_SECS",
        "FUNFAM_POLL_TIMEOUT_SECS",
        "FUNFAM_API_TIMEOUT_SECS",
        "FUNFAM_OUTPUT_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.poll_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.submit_strategy, SubmitStrategy::Native);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear_env();
        std::env::set_var("FUNFAM_BASE_URL", "http://example.com/");
        std::env::set_var("FUNFAM_POLL_INTERVAL_SECS", "0.5");
        std::env::set_var("FUNFAM_POLL_TIMEOUT_SECS", "0");
        std::env::set_var("FUNFAM_OUTPUT_DIR", "/tmp/funfam-out");

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.poll_timeout, None);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/funfam-out"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_from_env_rejects_garbage() {
        clear_env();
        std::env::set_var("FUNFAM_POLL_TIMEOUT_SECS", "ten");
        assert!(matches!(Config::from_env(), Err(CliError::Config(_))));

        clear_env();
        std::env::set_var("FUNFAM_POLL_INTERVAL_SECS", "-1");
        assert!(matches!(Config::from_env(), Err(CliError::Config(_))));

        clear_env();
        std::env::set_var("FUNFAM_POLL_INTERVAL_SECS", "1e30");
        assert!(matches!(Config::from_env(), Err(CliError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_config_setters() {
        let mut config = Config::default();

        config.set_poll_interval_secs(2.0).unwrap();
        assert_eq!(config.poll_policy().interval, Duration::from_secs(2));
        assert!(config.set_poll_interval_secs(0.0).is_err());
        assert!(matches!(
            config.set_poll_interval_secs(1e30),
            Err(CliError::Config(_))
        ));
        assert_eq!(config.poll_policy().interval, Duration::from_secs(2));

        config.set_poll_timeout_secs(0);
        assert_eq!(config.poll_policy().timeout, None);

        config.use_script_submission("perl");
        assert_eq!(
            config.submit_strategy,
            SubmitStrategy::Script {
                interpreter: "perl".to_string()
            }
        );
    }
}
