use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use trailhead_core::repository::TourRepository;
use trailhead_shared::{
    DepartureStatus, GroupDiscount, SeasonalPrice, TourDeparture, TourRecord, TourStatus,
};
use uuid::Uuid;

use crate::RedisClient;

/// Postgres "undefined table"; older projects never created `tour_departures`
const UNDEFINED_TABLE: &str = "42P01";

pub struct PostgresTourRepository {
    pool: PgPool,
    cache: Option<RedisClient>,
}

impl PostgresTourRepository {
    pub fn new(pool: PgPool, cache: Option<RedisClient>) -> Self {
        Self { pool, cache }
    }

    async fn fetch_tour(
        &self,
        id: Uuid,
    ) -> Result<Option<TourRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<TourRow> = sqlx::query_as(
            "SELECT id, name, url_slug, currency, status, price::FLOAT8 AS price FROM tours WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let seasonal: Vec<SeasonalPriceRow> = sqlx::query_as(
            r#"
            SELECT id::TEXT AS id, start_date, end_date, price::FLOAT8 AS price, label
            FROM seasonal_prices
            WHERE tour_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let discounts: Vec<GroupDiscountRow> = sqlx::query_as(
            r#"
            SELECT id::TEXT AS id, min_guests, max_guests, discount_percentage::FLOAT8 AS discount_percentage
            FROM group_discounts
            WHERE tour_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let departures = self.list_departures(id).await?;

        Ok(Some(TourRecord {
            id: row.id,
            name: row.name,
            url_slug: row.url_slug,
            currency: row.currency,
            status: parse_tour_status(row.status.as_deref()),
            price: row.price,
            seasonal_prices: seasonal.into_iter().map(Into::into).collect(),
            group_discounts: discounts.into_iter().map(Into::into).collect(),
            departures,
        }))
    }
}

#[derive(sqlx::FromRow)]
struct TourRow {
    id: Uuid,
    name: String,
    url_slug: Option<String>,
    currency: Option<String>,
    status: Option<String>,
    price: f64,
}

#[derive(sqlx::FromRow)]
struct SeasonalPriceRow {
    id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    price: f64,
    label: Option<String>,
}

impl From<SeasonalPriceRow> for SeasonalPrice {
    fn from(row: SeasonalPriceRow) -> Self {
        Self {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            price: row.price,
            label: row.label,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GroupDiscountRow {
    id: String,
    min_guests: i32,
    max_guests: i32,
    discount_percentage: f64,
}

impl From<GroupDiscountRow> for GroupDiscount {
    fn from(row: GroupDiscountRow) -> Self {
        Self {
            id: row.id,
            min_guests: row.min_guests.max(0) as u32,
            max_guests: row.max_guests.max(0) as u32,
            discount_percentage: row.discount_percentage,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DepartureRow {
    id: String,
    tour_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    price: f64,
    capacity: i32,
    spots_booked: i32,
    status: Option<String>,
}

impl From<DepartureRow> for TourDeparture {
    fn from(row: DepartureRow) -> Self {
        Self {
            id: row.id,
            tour_id: row.tour_id,
            start_date: row.start_date,
            end_date: row.end_date,
            price: row.price,
            capacity: row.capacity,
            spots_booked: row.spots_booked,
            status: parse_departure_status(row.status.as_deref()),
        }
    }
}

fn parse_tour_status(raw: Option<&str>) -> TourStatus {
    match raw {
        Some("Published") => TourStatus::Published,
        _ => TourStatus::Draft,
    }
}

fn parse_departure_status(raw: Option<&str>) -> DepartureStatus {
    match raw {
        Some("Full") => DepartureStatus::Full,
        Some("Cancelled") => DepartureStatus::Cancelled,
        Some("Completed") => DepartureStatus::Completed,
        _ => DepartureStatus::Available,
    }
}

#[async_trait]
impl TourRepository for PostgresTourRepository {
    async fn get_tour(
        &self,
        id: Uuid,
    ) -> Result<Option<TourRecord>, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cache) = &self.cache {
            // Cache failures fall through to Postgres
            match cache.get_tour_snapshot(id).await {
                Ok(Some(tour)) => return Ok(Some(tour)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Snapshot cache read failed for tour {}: {}", id, e),
            }
        }

        let tour = self.fetch_tour(id).await?;

        if let (Some(cache), Some(tour)) = (&self.cache, &tour) {
            if let Err(e) = cache.cache_tour_snapshot(tour).await {
                tracing::warn!("Snapshot cache write failed for tour {}: {}", id, e);
            }
        }

        Ok(tour)
    }

    async fn list_departures(
        &self,
        tour_id: Uuid,
    ) -> Result<Vec<TourDeparture>, Box<dyn std::error::Error + Send + Sync>> {
        let result: Result<Vec<DepartureRow>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT id::TEXT AS id, tour_id, start_date, end_date, price::FLOAT8 AS price,
                   capacity, spots_booked, status
            FROM tour_departures
            WHERE tour_id = $1
            ORDER BY start_date
            "#,
        )
        .bind(tour_id)
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => Ok(rows.into_iter().map(Into::into).collect()),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNDEFINED_TABLE) => {
                tracing::debug!("tour_departures table missing, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}
