use serde::{Deserialize, Serialize};
use trailhead_catalog::PricingModel;

use crate::discounts::best_tier;
use crate::selection::BookingSelection;

/// Flat per-booking surcharge once a date or departure is chosen
pub const FIXED_FEE: f64 = 100.0;

/// Which rule produced the unit price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    BasePrice,
    FixedDeparture { departure_id: String },
    GroupDiscount { tier_id: String, percentage: f64 },
    /// The selected departure no longer exists; base price was used
    StaleDeparture { departure_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub unit_price: f64,
    pub discount_amount: f64,
    pub base_price_total: f64,
    pub fees: f64,
    pub total_price: f64,
    pub source: PriceSource,
}

impl PriceBreakdown {
    pub fn discount_applied(&self) -> bool {
        self.discount_amount > 0.0
    }

    pub fn is_stale(&self) -> bool {
        matches!(self.source, PriceSource::StaleDeparture { .. })
    }
}

/// Turns a pricing model and a selection into a price breakdown.
///
/// Pure and total: a stale departure id degrades to the base price and
/// nothing here validates the model.
#[derive(Debug, Clone, Copy)]
pub struct PriceCalculator {
    fee: f64,
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self { fee: FIXED_FEE }
    }
}

impl PriceCalculator {
    pub fn with_fee(fee: f64) -> Self {
        Self { fee }
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    pub fn compute(&self, model: &PricingModel, selection: &BookingSelection) -> PriceBreakdown {
        let mut unit_price = model.price();
        let mut discount_amount = 0.0;
        let mut source = PriceSource::BasePrice;

        if let Some(departure_id) = selection.selected_departure_id() {
            // Fixed departure prices are final: no group discount on top
            match model.find_departure(departure_id) {
                Some(departure) => {
                    unit_price = departure.price;
                    source = PriceSource::FixedDeparture {
                        departure_id: departure_id.to_string(),
                    };
                }
                None => {
                    tracing::warn!(departure_id, "Selected departure not in pricing model, using base price");
                    source = PriceSource::StaleDeparture {
                        departure_id: departure_id.to_string(),
                    };
                }
            }
        } else if let Some(tier) = best_tier(model.group_discounts(), selection.guest_count()) {
            discount_amount = unit_price * tier.discount_percentage / 100.0;
            unit_price -= discount_amount;
            source = PriceSource::GroupDiscount {
                tier_id: tier.id.clone(),
                percentage: tier.discount_percentage,
            };
        }

        let base_price_total = unit_price * selection.guest_count() as f64;
        let fees = if selection.is_bookable() { self.fee } else { 0.0 };
        // Zero base means zero total, even when a fee would apply
        let total_price = if base_price_total > 0.0 { base_price_total + fees } else { 0.0 };

        PriceBreakdown {
            unit_price,
            discount_amount,
            base_price_total,
            fees,
            total_price,
            source,
        }
    }
}

/// Compute with the default fixed fee.
pub fn compute(model: &PricingModel, selection: &BookingSelection) -> PriceBreakdown {
    PriceCalculator::default().compute(model, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trailhead_shared::{GroupDiscount, SeasonalPrice};

    fn departure(id: &str, price: f64) -> SeasonalPrice {
        SeasonalPrice {
            id: id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            price,
            label: None,
        }
    }

    fn tier(id: &str, min: u32, max: u32, pct: f64) -> GroupDiscount {
        GroupDiscount {
            id: id.to_string(),
            min_guests: min,
            max_guests: max,
            discount_percentage: pct,
        }
    }

    fn some_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
    }

    #[test]
    fn test_custom_date_base_price() {
        let model = PricingModel::new(1200.0, None, None);
        let mut selection = BookingSelection::with_guest_count(2);
        selection.select_custom_date(some_date());

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 1200.0);
        assert_eq!(breakdown.base_price_total, 2400.0);
        assert_eq!(breakdown.fees, 100.0);
        assert_eq!(breakdown.total_price, 2500.0);
        assert_eq!(breakdown.source, PriceSource::BasePrice);
    }

    #[test]
    fn test_fixed_departure_overrides_base() {
        let model = PricingModel::new(1200.0, Some(vec![departure("d1", 950.0)]), None);
        let mut selection = BookingSelection::with_guest_count(3);
        selection.select_departure("d1");

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 950.0);
        assert_eq!(breakdown.base_price_total, 2850.0);
        assert_eq!(breakdown.total_price, 2950.0);
        assert_eq!(
            breakdown.source,
            PriceSource::FixedDeparture { departure_id: "d1".to_string() }
        );
    }

    #[test]
    fn test_missing_departure_falls_back_to_base() {
        let model = PricingModel::new(1200.0, Some(vec![departure("d1", 950.0)]), None);
        let mut selection = BookingSelection::with_guest_count(1);
        selection.select_departure("missing-id");

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 1200.0);
        assert_eq!(breakdown.total_price, 1300.0);
        assert!(breakdown.is_stale());
    }

    #[test]
    fn test_fixed_departure_never_discounted() {
        let model = PricingModel::new(
            1200.0,
            Some(vec![departure("d1", 950.0)]),
            Some(vec![tier("everyone", 1, 12, 25.0)]),
        );
        let mut selection = BookingSelection::with_guest_count(5);
        selection.select_departure("d1");

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.discount_amount, 0.0);
        assert!(!breakdown.discount_applied());
        assert_eq!(breakdown.unit_price, 950.0);
    }

    #[test]
    fn test_stale_departure_skips_group_discount() {
        let model = PricingModel::new(1000.0, None, Some(vec![tier("everyone", 1, 12, 25.0)]));
        let mut selection = BookingSelection::with_guest_count(4);
        selection.select_departure("gone");

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 1000.0);
        assert_eq!(breakdown.discount_amount, 0.0);
    }

    #[test]
    fn test_highest_overlapping_tier_applies() {
        let model = PricingModel::new(
            1000.0,
            None,
            Some(vec![tier("t10", 2, 6, 10.0), tier("t20", 4, 8, 20.0)]),
        );
        let mut selection = BookingSelection::with_guest_count(5);
        selection.select_custom_date(some_date());

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.discount_amount, 200.0);
        assert_eq!(breakdown.unit_price, 800.0);
        assert_eq!(breakdown.base_price_total, 4000.0);
        assert_eq!(breakdown.total_price, 4100.0);
        assert_eq!(
            breakdown.source,
            PriceSource::GroupDiscount { tier_id: "t20".to_string(), percentage: 20.0 }
        );
    }

    #[test]
    fn test_group_discount_shown_before_booking_option() {
        let model = PricingModel::new(1000.0, None, Some(vec![tier("pair", 2, 2, 10.0)]));
        let selection = BookingSelection::with_guest_count(2);

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 900.0);
        assert_eq!(breakdown.fees, 0.0);
        assert_eq!(breakdown.total_price, 1800.0);
    }

    #[test]
    fn test_no_matching_tier() {
        let model = PricingModel::new(1000.0, None, Some(vec![tier("big", 8, 12, 30.0)]));
        let selection = BookingSelection::with_guest_count(2);

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 1000.0);
        assert_eq!(breakdown.source, PriceSource::BasePrice);
    }

    #[test]
    fn test_zero_base_total_forces_zero_total() {
        let model = PricingModel::new(0.0, Some(vec![departure("free", 0.0)]), None);

        let mut selection = BookingSelection::with_guest_count(3);
        selection.select_custom_date(some_date());
        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.base_price_total, 0.0);
        assert_eq!(breakdown.fees, 100.0);
        assert_eq!(breakdown.total_price, 0.0);

        selection.select_departure("free");
        assert_eq!(compute(&model, &selection).total_price, 0.0);

        let unbooked = BookingSelection::new();
        assert_eq!(compute(&model, &unbooked).total_price, 0.0);
    }

    #[test]
    fn test_full_discount_yields_zero_total() {
        let model = PricingModel::new(500.0, None, Some(vec![tier("comp", 1, 12, 100.0)]));
        let mut selection = BookingSelection::with_guest_count(2);
        selection.select_custom_date(some_date());

        let breakdown = compute(&model, &selection);
        assert_eq!(breakdown.unit_price, 0.0);
        assert_eq!(breakdown.total_price, 0.0);
    }

    #[test]
    fn test_configured_fee() {
        let model = PricingModel::new(100.0, None, None);
        let mut selection = BookingSelection::with_guest_count(1);
        selection.select_custom_date(some_date());

        let breakdown = PriceCalculator::with_fee(35.0).compute(&model, &selection);
        assert_eq!(breakdown.fees, 35.0);
        assert_eq!(breakdown.total_price, 135.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let model = PricingModel::new(
            1000.0,
            Some(vec![departure("d1", 900.0)]),
            Some(vec![tier("a", 1, 4, 5.0), tier("b", 1, 4, 5.0)]),
        );
        let selection = BookingSelection::with_guest_count(3);
        assert_eq!(compute(&model, &selection), compute(&model, &selection));
    }
}
