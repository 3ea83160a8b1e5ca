pub mod pricing;
pub mod departures;
pub mod urgency;

pub use pricing::{PricingModel, PricingModelError};
pub use departures::{DepartureCatalog, DepartureViewEntry, MONTH_NAMES, PLACEHOLDER_SPOTS_LEFT};
pub use urgency::{UrgencyClassifier, UrgencyTag, UrgencyThresholds};
