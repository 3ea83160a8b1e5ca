use serde::Deserialize;
use std::env;

/// Longest "departing soon" window accepted from config or the database
pub const MAX_DEPARTING_SOON_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

/// Pricing and display knobs the back-office can tune without a deploy
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BusinessRules {
    pub booking_fee: f64,
    pub tax_rate: f64,
    pub deposit_rate: f64,
    pub departing_soon_days: i64,
    pub low_spots_threshold: u32,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            booking_fee: 100.0,
            tax_rate: 0.10,
            deposit_rate: 0.30,
            departing_soon_days: 45,
            low_spots_threshold: 4,
        }
    }
}

impl BusinessRules {
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=MAX_DEPARTING_SOON_DAYS).contains(&self.departing_soon_days) {
            return Err(format!(
                "business_rules.departing_soon_days must be between 0 and {}, got {}",
                MAX_DEPARTING_SOON_DAYS, self.departing_soon_days
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_snapshot_ttl")]
    pub snapshot_ttl_seconds: u64,
}

fn default_snapshot_ttl() -> u64 { 60 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `TRAILHEAD__DATABASE__URL=postgres://...`
            .add_source(config::Environment::with_prefix("TRAILHEAD").separator("__"))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config
            .business_rules
            .validate()
            .map_err(config::ConfigError::Message)?;
        Ok(config)
    }
}
