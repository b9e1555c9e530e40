// Demo configuration: artificial latencies, live-update timer and feed sizes
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "HOTEL_DEMO_";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Live update probability must be within [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("Recent bookings capacity must be at least 1")]
    ZeroCapacity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub search_latency_ms: u64,
    pub lookup_latency_ms: u64,
    pub geocode_latency_ms: u64,
    pub booking_latency_ms: u64,
    pub live_interval_ms: u64,
    pub live_probability: f64,
    pub feed_capacity: usize,
    // Rows shown in the live bookings section
    pub feed_display: usize,
    // Seed for the live-update generator; random when unset
    pub rng_seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            search_latency_ms: 1000,
            lookup_latency_ms: 500,
            geocode_latency_ms: 500,
            booking_latency_ms: 2000,
            live_interval_ms: 5000,
            live_probability: 0.1,
            feed_capacity: 5,
            feed_display: 3,
            rng_seed: None,
        }
    }
}

impl DemoConfig {
    // No artificial delays at all, handy for tests and benchmarks
    pub fn instant() -> Self {
        Self {
            search_latency_ms: 0,
            lookup_latency_ms: 0,
            geocode_latency_ms: 0,
            booking_latency_ms: 0,
            ..Self::default()
        }
    }

    // Load configuration from `HOTEL_DEMO_*` environment variables, falling
    // back to the defaults for anything unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            search_latency_ms: parse_var(&lookup, "SEARCH_LATENCY_MS")?
                .unwrap_or(defaults.search_latency_ms),
            lookup_latency_ms: parse_var(&lookup, "LOOKUP_LATENCY_MS")?
                .unwrap_or(defaults.lookup_latency_ms),
            geocode_latency_ms: parse_var(&lookup, "GEOCODE_LATENCY_MS")?
                .unwrap_or(defaults.geocode_latency_ms),
            booking_latency_ms: parse_var(&lookup, "BOOKING_LATENCY_MS")?
                .unwrap_or(defaults.booking_latency_ms),
            live_interval_ms: parse_var(&lookup, "LIVE_INTERVAL_MS")?
                .unwrap_or(defaults.live_interval_ms),
            live_probability: parse_var(&lookup, "LIVE_PROBABILITY")?
                .unwrap_or(defaults.live_probability),
            feed_capacity: parse_var(&lookup, "FEED_CAPACITY")?.unwrap_or(defaults.feed_capacity),
            feed_display: parse_var(&lookup, "FEED_DISPLAY")?.unwrap_or(defaults.feed_display),
            rng_seed: parse_var(&lookup, "RNG_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.live_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.live_probability));
        }
        if self.feed_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    pub fn lookup_latency(&self) -> Duration {
        Duration::from_millis(self.lookup_latency_ms)
    }

    pub fn geocode_latency(&self) -> Duration {
        Duration::from_millis(self.geocode_latency_ms)
    }

    pub fn booking_latency(&self) -> Duration {
        Duration::from_millis(self.booking_latency_ms)
    }

    pub fn live_interval(&self) -> Duration {
        Duration::from_millis(self.live_interval_ms)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let key = format!("{ENV_PREFIX}{name}");
    match lookup(&key).filter(|v| !v.trim().is_empty()) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name: key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = DemoConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.search_latency(), Duration::from_secs(1));
        assert_eq!(config.live_interval(), Duration::from_secs(5));
        assert_eq!(config.feed_capacity, 5);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = DemoConfig::from_lookup(lookup_from(&[
            ("HOTEL_DEMO_SEARCH_LATENCY_MS", "10"),
            ("HOTEL_DEMO_LIVE_PROBABILITY", "0.5"),
            ("HOTEL_DEMO_RNG_SEED", "42"),
            ("HOTEL_DEMO_FEED_CAPACITY", " 7 "),
        ]))
        .unwrap();
        assert_eq!(config.search_latency_ms, 10);
        assert_eq!(config.live_probability, 0.5);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.feed_capacity, 7);
        assert_eq!(config.booking_latency_ms, 2000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = DemoConfig::from_lookup(lookup_from(&[("HOTEL_DEMO_LIVE_INTERVAL_MS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "HOTEL_DEMO_LIVE_INTERVAL_MS".to_string(),
                value: "soon".to_string(),
            }
        );

        let err = DemoConfig::from_lookup(lookup_from(&[("HOTEL_DEMO_LIVE_PROBABILITY", "1.5")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::ProbabilityOutOfRange(1.5));

        let err = DemoConfig::from_lookup(lookup_from(&[("HOTEL_DEMO_FEED_CAPACITY", "0")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroCapacity);
    }

    #[test]
    fn test_validate_rejects_nan_probability() {
        let config = DemoConfig {
            live_probability: f64::NAN,
            ..DemoConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange(p)) if p.is_nan()
        ));
    }
}
