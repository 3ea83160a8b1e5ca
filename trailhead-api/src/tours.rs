use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trailhead_catalog::{DepartureCatalog, DepartureViewEntry, UrgencyTag, MONTH_NAMES, PLACEHOLDER_SPOTS_LEFT};
use trailhead_core::repository::load_snapshot;
use trailhead_shared::TourDeparture;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Dropdown filters; an absent field means "all"
#[derive(Debug, Default, Deserialize)]
pub struct DeparturesQuery {
    pub year: Option<i32>,
    /// Zero-based, 0 = January
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DepartureResponse {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub label: Option<String>,
    pub spots_left: u32,
    pub spots_label: String,
    pub urgency: UrgencyTag,
}

impl From<DepartureViewEntry> for DepartureResponse {
    fn from(entry: DepartureViewEntry) -> Self {
        Self {
            spots_label: entry.spots_label(),
            id: entry.id,
            start_date: entry.start_date,
            end_date: entry.end_date,
            price: entry.price,
            label: entry.label,
            spots_left: entry.spots_left,
            urgency: entry.urgency,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeparturesResponse {
    pub tour_id: Uuid,
    pub years: Vec<i32>,
    pub month_names: Vec<String>,
    pub available_dates: Vec<NaiveDate>,
    pub departures: Vec<DepartureResponse>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/tours/{id}/departures", get(list_departures))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/tours/{id}/departures?year=&month=
pub async fn list_departures(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeparturesQuery>,
) -> Result<Json<DeparturesResponse>, AppError> {
    if let Some(month) = query.month {
        if month > 11 {
            return Err(AppError::ValidationError(format!(
                "month must be between 0 and 11, got {}",
                month
            )));
        }
    }

    let snapshot = load_snapshot(state.tours.as_ref(), id).await?;
    let today = state.clock.today();

    let scheduled = &snapshot.tour.departures;
    let catalog = DepartureCatalog::with_spots(snapshot.model.seasonal_prices(), |sp| {
        spots_for(scheduled, &sp.id)
    })
    .annotate(&state.urgency, today);

    let departures = catalog
        .filter(query.year, query.month)
        .into_iter()
        .map(DepartureResponse::from)
        .collect();

    Ok(Json(DeparturesResponse {
        tour_id: id,
        years: catalog.available_years(),
        month_names: MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
        available_dates: catalog.available_dates(),
        departures,
    }))
}

/// Seats left from a matching scheduled departure row, else the placeholder
fn spots_for(scheduled: &[TourDeparture], departure_id: &str) -> u32 {
    scheduled
        .iter()
        .find(|d| d.id == departure_id)
        .map(TourDeparture::spots_left)
        .unwrap_or(PLACEHOLDER_SPOTS_LEFT)
}
