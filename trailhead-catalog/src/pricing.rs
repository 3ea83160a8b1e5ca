use serde::{Deserialize, Serialize};
use trailhead_shared::{GroupDiscount, SeasonalPrice, TourRecord};

/// Read-only pricing inputs for one tour.
///
/// Built once per tour load and never mutated afterwards. A missing
/// seasonal or group-discount collection is the same as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingModel {
    price: f64,
    #[serde(default)]
    seasonal_prices: Vec<SeasonalPrice>,
    #[serde(default)]
    group_discounts: Vec<GroupDiscount>,
}

impl PricingModel {
    /// Assemble a model without checking the base price.
    pub fn new(
        price: f64,
        seasonal_prices: Option<Vec<SeasonalPrice>>,
        group_discounts: Option<Vec<GroupDiscount>>,
    ) -> Self {
        Self {
            price,
            seasonal_prices: seasonal_prices.unwrap_or_default(),
            group_discounts: group_discounts.unwrap_or_default(),
        }
    }

    /// Boundary constructor for data coming from the backend: rejects a
    /// negative or non-finite base price.
    pub fn validated(
        price: f64,
        seasonal_prices: Option<Vec<SeasonalPrice>>,
        group_discounts: Option<Vec<GroupDiscount>>,
    ) -> Result<Self, PricingModelError> {
        if !price.is_finite() {
            return Err(PricingModelError::NonFinitePrice);
        }
        if price < 0.0 {
            return Err(PricingModelError::NegativePrice(price));
        }
        Ok(Self::new(price, seasonal_prices, group_discounts))
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn seasonal_prices(&self) -> &[SeasonalPrice] {
        &self.seasonal_prices
    }

    pub fn group_discounts(&self) -> &[GroupDiscount] {
        &self.group_discounts
    }

    pub fn find_departure(&self, id: &str) -> Option<&SeasonalPrice> {
        self.seasonal_prices.iter().find(|sp| sp.id == id)
    }
}

impl TryFrom<&TourRecord> for PricingModel {
    type Error = PricingModelError;

    fn try_from(tour: &TourRecord) -> Result<Self, Self::Error> {
        Self::validated(
            tour.price,
            Some(tour.seasonal_prices.clone()),
            Some(tour.group_discounts.clone()),
        )
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PricingModelError {
    #[error("Base price must be finite")]
    NonFinitePrice,

    #[error("Base price must not be negative: {0}")]
    NegativePrice(f64),
}
