//! Collector configuration.
//!
//! Defaults describe the complete collection grid, so running without any
//! configuration processes every currency for every period. Each value can
//! be overridden through the environment (or `.env`), which is mostly useful
//! for collecting a subset or for pointing at a test endpoint.



use std::{
    env,
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use chrono::TimeDelta;

use crate::{
    currency::Currency,
    error::ConfigError,
    period::Period,
    retry::RetryPolicy,
};



pub const DEFAULT_URL: &str = "https://gatsby.bl3ebird.workers.dev/graph";

pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Hours subtracted from the local clock before computing date ranges. The
/// endpoint's notion of "today" lags behind local time by this much.
pub const DEFAULT_NOW_OFFSET_HOURS: i64 = 3;

/// Largest accepted clock offset, either direction.
pub const MAX_NOW_OFFSET_HOURS: i64 = 24 * 365;

pub const DEFAULT_REQUEST_PAUSE: Duration = Duration::from_secs(10);



#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    JsonFiles,
    Stdout,
}



impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageKind::JsonFiles),
            "stdout" => Ok(StorageKind::Stdout),
            other => Err(ConfigError::InvalidValue {
                name: "FX_STORAGE",
                value: other.to_string(),
            }),
        }
    }
}



/// Everything the collector needs to know about a run.
///
/// `currencies` x `periods` is the collection grid, walked currency by
/// currency.
/// `now_offset` - subtracted from the clock before date ranges are computed.
/// `request_pause` - wait after each combination the endpoint answered.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub url: String,
    pub currencies: Vec<Currency>,
    pub periods: Vec<Period>,
    pub now_offset: TimeDelta,
    pub retry: RetryPolicy,
    pub request_pause: Duration,
    pub results_dir: PathBuf,
    pub storage: StorageKind,
}



impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            currencies: Currency::ALL.to_vec(),
            periods: Period::ALL.to_vec(),
            now_offset: TimeDelta::hours(DEFAULT_NOW_OFFSET_HOURS),
            retry: RetryPolicy::default(),
            request_pause: DEFAULT_REQUEST_PAUSE,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            storage: StorageKind::JsonFiles,
        }
    }
}



impl CollectorConfig {
    /// Load configuration from ENV, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }


    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>)
        -> Result<Self, ConfigError>
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup("FX_URL") {
            cfg.url = url;
        }

        if let Some(dir) = lookup("FX_RESULTS_DIR") {
            cfg.results_dir = PathBuf::from(dir);
        }

        if let Some(kind) = lookup("FX_STORAGE") {
            cfg.storage = kind.parse()?;
        }

        if let Some(list) = lookup("FX_CURRENCIES") {
            cfg.currencies = parse_list(&list, "FX_CURRENCIES")?;
        }

        if let Some(list) = lookup("FX_PERIODS") {
            cfg.periods = parse_list(&list, "FX_PERIODS")?;
        }

        if let Some(hours) = parse_number::<i64>(&lookup, "FX_NOW_OFFSET_HOURS")? {
            if hours.abs() > MAX_NOW_OFFSET_HOURS {
                return Err(ConfigError::InvalidValue {
                    name: "FX_NOW_OFFSET_HOURS",
                    value: hours.to_string(),
                })
            }

            cfg.now_offset = TimeDelta::hours(hours);
        }

        if let Some(attempts) = parse_number::<u32>(&lookup, "FX_RETRY_ATTEMPTS")? {
            if attempts == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "FX_RETRY_ATTEMPTS",
                    value: attempts.to_string(),
                })
            }

            cfg.retry.attempts = attempts;
        }

        if let Some(secs) = parse_number::<u64>(&lookup, "FX_RETRY_DELAY_SECS")? {
            cfg.retry.delay = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_number::<u64>(&lookup, "FX_REQUEST_PAUSE_SECS")? {
            cfg.request_pause = Duration::from_secs(secs);
        }

        Ok(cfg)
    }
}



fn parse_number<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str
)
    -> Result<Option<T>, ConfigError>
{
    let Some(raw) = lookup(name) else {
        return Ok(None)
    };

    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { name, value: raw })
}



// Comma separated list, duplicates dropped while keeping first-seen order.
fn parse_list<T>(raw: &str, name: &'static str) -> Result<Vec<T>, ConfigError>
where
    T: FromStr<Err = ConfigError> + PartialEq,
{
    let mut items: Vec<T> = Vec::new();

    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let item = part.parse()?;
        if !items.contains(&item) {
            items.push(item);
        }
    }

    if items.is_empty() {
        return Err(ConfigError::Empty(name))
    }

    Ok(items)
}



#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CollectorConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        CollectorConfig::from_lookup(|name| vars.get(name).cloned())
    }


    #[test]
    fn test_defaults_cover_full_grid() {
        let cfg = load(&[]).unwrap();

        assert_eq!(cfg.currencies.len(), 28);
        assert_eq!(cfg.periods.len(), 7);
        assert_eq!(cfg.now_offset, TimeDelta::hours(3));
        assert_eq!(cfg.retry, RetryPolicy { attempts: 2, delay: Duration::from_secs(5) });
        assert_eq!(cfg.request_pause, Duration::from_secs(10));
        assert_eq!(cfg.results_dir, PathBuf::from("results"));
        assert_eq!(cfg.storage, StorageKind::JsonFiles);
        assert_eq!(cfg.url, DEFAULT_URL);
    }


    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("FX_URL", "http://127.0.0.1:8080/graph"),
            ("FX_CURRENCIES", "EUR, usd,eur"),
            ("FX_PERIODS", "1_year,7_days"),
            ("FX_NOW_OFFSET_HOURS", "0"),
            ("FX_RETRY_ATTEMPTS", "4"),
            ("FX_RETRY_DELAY_SECS", "1"),
            ("FX_REQUEST_PAUSE_SECS", "0"),
            ("FX_RESULTS_DIR", "/tmp/out"),
            ("FX_STORAGE", "stdout"),
        ]).unwrap();

        assert_eq!(cfg.url, "http://127.0.0.1:8080/graph");
        assert_eq!(cfg.currencies, vec![Currency::Eur, Currency::Usd]);
        assert_eq!(cfg.periods, vec![Period::OneYear, Period::SevenDays]);
        assert_eq!(cfg.now_offset, TimeDelta::zero());
        assert_eq!(cfg.retry.attempts, 4);
        assert_eq!(cfg.retry.delay, Duration::from_secs(1));
        assert_eq!(cfg.request_pause, Duration::ZERO);
        assert_eq!(cfg.results_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.storage, StorageKind::Stdout);
    }


    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(load(&[("FX_CURRENCIES", "usd,xxx")]).unwrap_err(),
            ConfigError::UnknownCurrency("xxx".to_string())
        );
        assert_eq!(load(&[("FX_PERIODS", "2_days")]).unwrap_err(),
            ConfigError::UnknownPeriod("2_days".to_string())
        );
        assert_eq!(load(&[("FX_CURRENCIES", " , ")]).unwrap_err(),
            ConfigError::Empty("FX_CURRENCIES")
        );
        assert!(load(&[("FX_RETRY_ATTEMPTS", "0")]).is_err());
        assert!(load(&[("FX_REQUEST_PAUSE_SECS", "soon")]).is_err());
        assert!(load(&[("FX_STORAGE", "postgres")]).is_err());
    }


    #[test]
    fn test_offset_is_bounded() {
        assert_eq!(load(&[("FX_NOW_OFFSET_HOURS", "1000000000000")]).unwrap_err(),
            ConfigError::InvalidValue {
                name: "FX_NOW_OFFSET_HOURS",
                value: "1000000000000".to_string(),
            }
        );
        assert!(load(&[("FX_NOW_OFFSET_HOURS", "-8761")]).is_err());

        let cfg = load(&[("FX_NOW_OFFSET_HOURS", "-8760")]).unwrap();
        assert_eq!(cfg.now_offset, TimeDelta::hours(-8760));
    }
}
