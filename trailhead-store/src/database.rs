use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::{info, warn};
use serde_json::Value;

use crate::app_config::{BusinessRules, MAX_DEPARTING_SOON_DAYS};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Overlay rules stored in the `business_rules` table on top of `defaults`.
    ///
    /// Rows look like `("booking_fee", {"value": 100})`; unknown keys and
    /// values of the wrong type are skipped.
    pub async fn fetch_business_rules(&self, defaults: BusinessRules) -> Result<BusinessRules, sqlx::Error> {
        let rows: Vec<(String, Value)> = sqlx::query_as("SELECT rule_key, rule_value FROM business_rules")
            .fetch_all(&self.pool)
            .await?;

        Ok(apply_rule_rows(defaults, rows))
    }
}

fn apply_rule_rows(defaults: BusinessRules, rows: Vec<(String, Value)>) -> BusinessRules {
    let mut rules = defaults;

    for (key, value) in rows {
        let Some(v) = value.get("value") else { continue };
        match key.as_str() {
            "booking_fee" => {
                if let Some(f) = v.as_f64() {
                    rules.booking_fee = f;
                }
            }
            "tax_rate" => {
                if let Some(f) = v.as_f64() {
                    rules.tax_rate = f;
                }
            }
            "deposit_rate" => {
                if let Some(f) = v.as_f64() {
                    rules.deposit_rate = f;
                }
            }
            "departing_soon_days" => {
                match v.as_i64() {
                    Some(i) if (0..=MAX_DEPARTING_SOON_DAYS).contains(&i) => {
                        rules.departing_soon_days = i;
                    }
                    _ => warn!("Ignoring out-of-range departing_soon_days rule: {}", v),
                }
            }
            "low_spots_threshold" => {
                if let Some(u) = v.as_u64().and_then(|u| u32::try_from(u).ok()) {
                    rules.low_spots_threshold = u;
                }
            }
            _ => {}
        }
    }

    rules
}
