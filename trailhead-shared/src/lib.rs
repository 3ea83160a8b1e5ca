pub mod models;

pub use models::tour::{
    DepartureStatus, GroupDiscount, SeasonalPrice, TourDeparture, TourRecord, TourStatus,
};
