use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a tour in the back-office
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TourStatus {
    Published,
    #[default]
    Draft,
}

/// A tour as read from the backend, with its pricing collections joined in.
///
/// Related collections that the backend omits deserialize as empty lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub url_slug: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: TourStatus,
    pub price: f64,
    #[serde(default)]
    pub seasonal_prices: Vec<SeasonalPrice>,
    #[serde(default)]
    pub group_discounts: Vec<GroupDiscount>,
    #[serde(default)]
    pub departures: Vec<TourDeparture>,
}

impl TourRecord {
    pub fn new(id: Uuid, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            url_slug: None,
            currency: None,
            status: TourStatus::Published,
            price,
            seasonal_prices: Vec::new(),
            group_discounts: Vec::new(),
            departures: Vec::new(),
        }
    }
}

/// A fixed departure with its own all-inclusive price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonalPrice {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    #[serde(default)]
    pub label: Option<String>,
}

/// Percentage reduction keyed to a guest-count range (both ends inclusive)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupDiscount {
    pub id: String,
    pub min_guests: u32,
    pub max_guests: u32,
    pub discount_percentage: f64,
}

impl GroupDiscount {
    pub fn covers(&self, guests: u32) -> bool {
        self.min_guests <= guests && guests <= self.max_guests
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DepartureStatus {
    #[default]
    Available,
    Full,
    Cancelled,
    Completed,
}

/// Scheduled departure row with capacity bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TourDeparture {
    pub id: String,
    pub tour_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub capacity: i32,
    pub spots_booked: i32,
    #[serde(default)]
    pub status: DepartureStatus,
}

impl TourDeparture {
    /// Remaining seats, never negative
    pub fn spots_left(&self) -> u32 {
        (self.capacity - self.spots_booked).max(0) as u32
    }
}
