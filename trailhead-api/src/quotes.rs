use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use trailhead_booking::{
    AddOn, BookingSelection, CheckoutSummary, PaymentPlan, PriceBreakdown, SelectionAction,
};
use trailhead_core::repository::load_snapshot;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// User interactions in the order they happened, replayed onto a fresh selection
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub actions: Vec<SelectionAction>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub tour_id: Uuid,
    pub selection: BookingSelection,
    pub bookable: bool,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub actions: Vec<SelectionAction>,
    #[serde(default)]
    pub add_ons: Vec<String>,
    #[serde(default)]
    pub payment_plan: PaymentPlan,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub tour_id: Uuid,
    pub tour_name: String,
    pub selection: BookingSelection,
    pub summary: CheckoutSummary,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tours/{id}/quote", post(quote))
        .route("/v1/tours/{id}/checkout", post(checkout))
        .route("/v1/add-ons", get(list_add_ons))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/tours/{id}/quote
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    // The model must exist before anything is priced
    let snapshot = load_snapshot(state.tours.as_ref(), id).await?;

    let selection = BookingSelection::replay(&req.actions);
    let breakdown = state.calculator.compute(&snapshot.model, &selection);

    tracing::debug!(
        tour_id = %id,
        guests = selection.guest_count(),
        total = breakdown.total_price,
        "Quote computed"
    );

    Ok(Json(QuoteResponse {
        tour_id: id,
        bookable: selection.is_bookable(),
        selection,
        breakdown,
    }))
}

/// POST /v1/tours/{id}/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let snapshot = load_snapshot(state.tours.as_ref(), id).await?;

    let selection = BookingSelection::replay(&req.actions);
    let trip = state.calculator.compute(&snapshot.model, &selection);
    let summary = CheckoutSummary::build(
        &selection,
        trip,
        &state.add_ons,
        &req.add_ons,
        req.payment_plan,
        state.checkout_rates,
    )?;

    tracing::info!(
        tour_id = %id,
        total_due = summary.total_due,
        plan = ?summary.payment_plan,
        "Checkout summary prepared"
    );

    Ok(Json(CheckoutResponse {
        tour_id: id,
        tour_name: snapshot.tour.name,
        selection,
        summary,
    }))
}

/// GET /v1/add-ons
pub async fn list_add_ons(State(state): State<AppState>) -> Json<Vec<AddOn>> {
    Json(state.add_ons.as_ref().clone())
}
