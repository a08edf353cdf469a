use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Time between sweeps (`SWEEP_INTERVAL_SECS`).
    pub sweep_interval: Duration,
    /// Age at which unpaid orders are deleted (`PENDING_PAYMENT_TTL_HOURS`).
    pub pending_payment_ttl_hours: i64,
    /// Mailbox capacity of each collection actor (`MAILBOX_SIZE`).
    pub mailbox_size: usize,
}

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;
const DEFAULT_PENDING_PAYMENT_TTL_HOURS: i64 = 24;
const DEFAULT_MAILBOX_SIZE: usize = 32;

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            pending_payment_ttl_hours: DEFAULT_PENDING_PAYMENT_TTL_HOURS,
            mailbox_size: DEFAULT_MAILBOX_SIZE,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self {
            sweep_interval: Duration::from_secs(try_load_positive(
                "SWEEP_INTERVAL_SECS",
                DEFAULT_SWEEP_INTERVAL_SECS,
            )),
            pending_payment_ttl_hours: try_load_positive(
                "PENDING_PAYMENT_TTL_HOURS",
                DEFAULT_PENDING_PAYMENT_TTL_HOURS,
            ),
            mailbox_size: try_load_positive("MAILBOX_SIZE", DEFAULT_MAILBOX_SIZE),
        }
    }
}

fn try_load_positive<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + PartialOrd + Default + Copy,
    T::Err: Display,
{
    positive_or(key, try_load(key, default), default)
}

// Zero and negative values are rejected like unparsable ones.
fn positive_or<T>(key: &str, value: T, default: T) -> T
where
    T: Display + PartialOrd + Default,
{
    if value > T::default() {
        value
    } else {
        warn!("{key} must be positive, got {value}, using default: {default}");
        default
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
