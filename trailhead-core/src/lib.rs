pub mod repository;
pub mod clock;

use trailhead_catalog::PricingModelError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Tour not found: {0}")]
    TourNotFound(String),
    #[error("Invalid pricing data: {0}")]
    InvalidPricing(#[from] PricingModelError),
    #[error("Data provider error: {0}")]
    Provider(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
