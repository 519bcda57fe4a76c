//! Runtime configuration.
//!
//! Resolution order for each setting: explicit CLI value, then the
//! environment (a `.env` file is loaded first if present), then the default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default service address.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Pause between a verdict and the next question.
pub const DEFAULT_NEXT_QUESTION_DELAY: Duration = Duration::from_millis(1500);

/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_URL: &str = "QUIZ_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "QUIZ_TIMEOUT_SECS";
pub const ENV_NEXT_DELAY_MS: &str = "QUIZ_NEXT_DELAY_MS";

/// Resolved settings shared by the CLI and the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the quiz service, without trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
    pub next_question_delay: Duration,
    /// Where the TUI writes its log (the terminal belongs to ratatui).
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            next_question_delay: DEFAULT_NEXT_QUESTION_DELAY,
            log_file: default_log_file(),
        }
    }
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub next_delay_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from CLI overrides and the process environment.
    pub fn load(overrides: Overrides) -> Result<Self, String> {
        // Missing .env is normal
        let _ = dotenvy::dotenv();
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let defaults = Config::default();

        let api_url = overrides
            .api_url
            .or_else(|| lookup(ENV_API_URL))
            .unwrap_or(defaults.api_url);
        let api_url = normalize_api_url(&api_url)?;

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => parse_env_number(&lookup, ENV_TIMEOUT_SECS)?,
        };
        let request_timeout = timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let next_delay_ms = match overrides.next_delay_ms {
            Some(ms) => Some(ms),
            None => parse_env_number(&lookup, ENV_NEXT_DELAY_MS)?,
        };
        let next_question_delay = next_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.next_question_delay);

        Ok(Config {
            api_url,
            request_timeout,
            next_question_delay,
            log_file: overrides.log_file.unwrap_or(defaults.log_file),
        })
    }
}

/// Returns the default log file location.
///
/// Linux: ~/.local/share/blank-quiz/blank-quiz.log
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blank-quiz")
        .join("blank-quiz.log")
}

fn normalize_api_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("API URL must start with http:// or https://, got {:?}", raw));
    }
    Ok(trimmed.to_string())
}

fn parse_env_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<u64>, String> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("{} must be a whole number, got {:?}", key, raw)),
    }
}
