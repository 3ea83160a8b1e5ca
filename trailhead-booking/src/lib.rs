pub mod selection;
pub mod discounts;
pub mod calculator;
pub mod checkout;

pub use selection::{BookingSelection, SelectionAction, MAX_GUESTS, MIN_GUESTS};
pub use calculator::{compute, PriceBreakdown, PriceCalculator, PriceSource, FIXED_FEE};
pub use checkout::{default_add_ons, AddOn, CheckoutError, CheckoutRates, CheckoutSummary, PaymentPlan};
