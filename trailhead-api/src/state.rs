use std::sync::Arc;
use trailhead_booking::{default_add_ons, AddOn, CheckoutRates, PriceCalculator};
use trailhead_catalog::{UrgencyClassifier, UrgencyThresholds};
use trailhead_core::clock::Clock;
use trailhead_core::repository::TourRepository;
use trailhead_store::app_config::BusinessRules;

#[derive(Clone)]
pub struct AppState {
    pub tours: Arc<dyn TourRepository>,
    pub clock: Arc<dyn Clock>,
    pub calculator: PriceCalculator,
    pub urgency: UrgencyClassifier,
    pub checkout_rates: CheckoutRates,
    pub add_ons: Arc<Vec<AddOn>>,
}

impl AppState {
    pub fn new(tours: Arc<dyn TourRepository>, clock: Arc<dyn Clock>, rules: &BusinessRules) -> Self {
        Self {
            tours,
            clock,
            calculator: PriceCalculator::with_fee(rules.booking_fee),
            urgency: UrgencyClassifier::new(UrgencyThresholds {
                departing_soon_days: rules.departing_soon_days,
                low_spots: rules.low_spots_threshold,
            }),
            checkout_rates: CheckoutRates {
                tax_rate: rules.tax_rate,
                deposit_rate: rules.deposit_rate,
            },
            add_ons: Arc::new(default_add_ons()),
        }
    }
}
