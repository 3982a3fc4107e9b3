use boxoffice_core::{Venue, DEFAULT_HOLD_TTL, MAX_HOLD_TTL};
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub venue: VenueConfig,
    pub holds: HoldRules,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VenueConfig {
    pub max_seats: u32,
}

impl VenueConfig {
    pub fn venue(&self) -> Venue {
        Venue::new(self.max_seats)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HoldRules {
    pub hold_ttl_seconds: u64,
    /// 0 turns the background sweeper off.
    pub sweep_interval_seconds: u64,
}

impl HoldRules {
    pub fn hold_ttl(&self) -> Duration {
        Duration::from_secs(self.hold_ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_seconds > 0).then(|| Duration::from_secs(self.sweep_interval_seconds))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub filter: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        tracing::debug!(%run_mode, "loading configuration");

        let s = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `BOXOFFICE__HOLDS__HOLD_TTL_SECONDS=30`
            .add_source(
                config::Environment::with_prefix("BOXOFFICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_settings(s)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.port", 8080_i64)?
            .set_default("venue.max_seats", 100_i64)?
            .set_default("holds.hold_ttl_seconds", DEFAULT_HOLD_TTL.as_secs())?
            .set_default("holds.sweep_interval_seconds", 1_i64)?
            .set_default(
                "log.filter",
                "boxoffice_api=debug,boxoffice_hold=debug,tower_http=debug",
            )
    }

    fn from_settings(s: config::Config) -> Result<Self, ConfigError> {
        let config: Self = s.try_deserialize()?;
        if config.holds.hold_ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "holds.hold_ttl_seconds must be greater than zero".to_string(),
            ));
        }
        if config.holds.hold_ttl_seconds > MAX_HOLD_TTL.as_secs() {
            return Err(ConfigError::Message(format!(
                "holds.hold_ttl_seconds must be at most {}",
                MAX_HOLD_TTL.as_secs()
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let s = Config::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Config::from_settings(s)
    }

    #[test]
    fn test_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.venue.venue().max_seats(), 100);
        assert_eq!(config.holds.hold_ttl(), DEFAULT_HOLD_TTL);
        assert_eq!(config.holds.sweep_interval(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_file_overrides() {
        let config = parse(
            r#"
            [venue]
            max_seats = 250

            [holds]
            hold_ttl_seconds = 30
            sweep_interval_seconds = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.venue.max_seats, 250);
        assert_eq!(config.holds.hold_ttl(), Duration::from_secs(30));
        assert_eq!(config.holds.sweep_interval(), None);
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let result = parse("[holds]\nhold_ttl_seconds = 9223372036854775807\n");
        assert!(matches!(result, Err(ConfigError::Message(_))));

        let config = parse("[holds]\nhold_ttl_seconds = 86400\n").unwrap();
        assert_eq!(config.holds.hold_ttl(), MAX_HOLD_TTL);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let result = parse("[holds]\nhold_ttl_seconds = 0\n");
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }
}
