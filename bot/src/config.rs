use std::str::FromStr;
use std::time::Duration;

use market::dexscreener::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use market::pulse::DEFAULT_SPIKE_THRESHOLD;
use market::rolling_window::DEFAULT_WINDOW_SIZE;
use scheduler::dispatcher::MenuLabels;
use scheduler::types::SchedulerConfig;

use crate::error::AppError;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Bot API secret. Required.
    pub telegram_token: String,

    pub telegram_api_url: String,

    /// Base URL of the quote API.
    pub dexscreener_api_url: String,

    /// Upper bound on one quote fetch.
    pub fetch_timeout: Duration,

    /// Samples kept per token (N). One window spans one hour of checks.
    pub window_size: usize,

    /// Digest / spike cadences and the spike threshold.
    pub scheduler: SchedulerConfig,

    /// Reply-keyboard labels; inbound text is matched against them exactly.
    pub labels: MenuLabels,
}

impl AppConfig {
    /// Reads the process environment (after `.env`, if the caller loaded one).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(AppError::MissingSecret("TELEGRAM_TOKEN"))?;

        let window_size: usize = parse_or(&lookup, "WINDOW_SIZE", DEFAULT_WINDOW_SIZE)?;
        if window_size == 0 {
            return Err(invalid("WINDOW_SIZE", window_size));
        }

        let default_check = SchedulerConfig::hourly_check_interval(window_size).as_secs();
        let check_secs: u64 = parse_or(&lookup, "CHECK_INTERVAL_SECS", default_check)?;
        let report_secs: u64 = parse_or(&lookup, "REPORT_INTERVAL_SECS", 2 * 60 * 60)?;
        let timeout_secs: u64 = parse_or(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;
        let spike_threshold: f64 =
            parse_or(&lookup, "SPIKE_THRESHOLD", DEFAULT_SPIKE_THRESHOLD)?;

        for (name, v) in [
            ("CHECK_INTERVAL_SECS", check_secs),
            ("REPORT_INTERVAL_SECS", report_secs),
            ("FETCH_TIMEOUT_SECS", timeout_secs),
        ] {
            if v == 0 {
                return Err(invalid(name, v));
            }
        }
        if !spike_threshold.is_finite() || spike_threshold <= 0.0 {
            return Err(invalid("SPIKE_THRESHOLD", spike_threshold));
        }

        Ok(Self {
            telegram_token,
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            dexscreener_api_url: lookup("DEXSCREENER_API_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            fetch_timeout: Duration::from_secs(timeout_secs),
            window_size,
            scheduler: SchedulerConfig {
                report_interval: Duration::from_secs(report_secs),
                check_interval: Duration::from_secs(check_secs),
                spike_threshold,
            },
            labels: MenuLabels::default(),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| AppError::InvalidConfig {
            name,
            value: raw,
        }),
    }
}

fn invalid(name: &'static str, value: impl ToString) -> AppError {
    AppError::InvalidConfig {
        name,
        value: value.to_string(),
    }
}
