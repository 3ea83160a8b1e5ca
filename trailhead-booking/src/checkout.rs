use serde::{Deserialize, Serialize};

use crate::calculator::PriceBreakdown;
use crate::selection::BookingSelection;

pub const DEFAULT_TAX_RATE: f64 = 0.10;
pub const DEFAULT_DEPOSIT_RATE: f64 = 0.30;

/// Optional flat-priced extra offered at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

impl AddOn {
    pub fn new(id: &str, name: &str, price: f64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            description: Some(description.to_string()),
        }
    }
}

pub fn default_add_ons() -> Vec<AddOn> {
    vec![
        AddOn::new(
            "privateRoom",
            "Private Room Upgrade",
            350.0,
            "Guaranteed single occupancy room in Kathmandu and teahouses during the trek.",
        ),
        AddOn::new(
            "porter",
            "Extra Porter Weight (10kg)",
            150.0,
            "Increase your luggage allowance. We'll carry one heavy item for you.",
        ),
        AddOn::new(
            "helicopter",
            "Helicopter Return",
            900.0,
            "Skip the descent and fly back to Kathmandu with breathtaking aerial views.",
        ),
        AddOn::new(
            "transfer",
            "Private Luxury Transfer",
            60.0,
            "Premium airport pickup and drop-off in a private vehicle.",
        ),
    ]
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPlan {
    #[default]
    Full,
    Partial,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRates {
    pub tax_rate: f64,
    pub deposit_rate: f64,
}

impl Default for CheckoutRates {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            deposit_rate: DEFAULT_DEPOSIT_RATE,
        }
    }
}

/// Everything the payment step needs, built on top of a trip price breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSummary {
    pub trip: PriceBreakdown,
    pub add_ons: Vec<AddOn>,
    pub add_ons_total: f64,
    pub subtotal: f64,
    pub taxes: f64,
    pub total_due: f64,
    pub payment_plan: PaymentPlan,
    pub amount_due_now: f64,
}

impl CheckoutSummary {
    /// Add the selected extras, tax and payment plan to the trip price.
    ///
    /// Unknown add-on ids are ignored; each add-on counts once however many
    /// times it is listed.
    pub fn build(
        selection: &BookingSelection,
        trip: PriceBreakdown,
        catalogue: &[AddOn],
        selected_ids: &[String],
        plan: PaymentPlan,
        rates: CheckoutRates,
    ) -> Result<Self, CheckoutError> {
        if !selection.is_bookable() {
            return Err(CheckoutError::NotBookable);
        }

        let add_ons: Vec<AddOn> = catalogue
            .iter()
            .filter(|a| selected_ids.iter().any(|id| id == &a.id))
            .cloned()
            .collect();

        let add_ons_total: f64 = add_ons.iter().map(|a| a.price).sum();
        let subtotal = trip.total_price + add_ons_total;
        let taxes = subtotal * rates.tax_rate;
        let total_due = subtotal + taxes;
        let amount_due_now = match plan {
            PaymentPlan::Full => total_due,
            PaymentPlan::Partial => total_due * rates.deposit_rate,
        };

        Ok(Self {
            trip,
            add_ons,
            add_ons_total,
            subtotal,
            taxes,
            total_due,
            payment_plan: plan,
            amount_due_now,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CheckoutError {
    #[error("Choose a date or a fixed departure before checking out")]
    NotBookable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;
    use chrono::NaiveDate;
    use trailhead_catalog::PricingModel;

    fn booked(guests: u32) -> BookingSelection {
        let mut selection = BookingSelection::with_guest_count(guests);
        selection.select_custom_date(NaiveDate::from_ymd_opt(2025, 10, 5).unwrap());
        selection
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_checkout_requires_booking_option() {
        let model = PricingModel::new(1200.0, None, None);
        let selection = BookingSelection::new();
        let result = CheckoutSummary::build(
            &selection,
            compute(&model, &selection),
            &default_add_ons(),
            &[],
            PaymentPlan::Full,
            CheckoutRates::default(),
        );
        assert_eq!(result, Err(CheckoutError::NotBookable));
    }

    #[test]
    fn test_full_payment_summary() {
        let model = PricingModel::new(1200.0, None, None);
        let selection = booked(2);
        let summary = CheckoutSummary::build(
            &selection,
            compute(&model, &selection),
            &default_add_ons(),
            &ids(&["privateRoom", "transfer", "unknown"]),
            PaymentPlan::Full,
            CheckoutRates::default(),
        )
        .expect("bookable");

        assert_eq!(summary.trip.total_price, 2500.0);
        assert_eq!(summary.add_ons.len(), 2);
        assert_eq!(summary.add_ons_total, 410.0);
        assert_eq!(summary.subtotal, 2910.0);
        assert!((summary.taxes - 291.0).abs() < 1e-9);
        assert!((summary.total_due - 3201.0).abs() < 1e-9);
        assert_eq!(summary.amount_due_now, summary.total_due);
    }

    #[test]
    fn test_partial_payment_takes_deposit_share() {
        let model = PricingModel::new(1000.0, None, None);
        let selection = booked(1);
        let rates = CheckoutRates { tax_rate: 0.0, deposit_rate: 0.25 };
        let summary = CheckoutSummary::build(
            &selection,
            compute(&model, &selection),
            &default_add_ons(),
            &ids(&["porter", "porter"]),
            PaymentPlan::Partial,
            rates,
        )
        .expect("bookable");

        assert_eq!(summary.add_ons_total, 150.0);
        assert_eq!(summary.total_due, 1250.0);
        assert_eq!(summary.amount_due_now, 312.5);
    }
}
