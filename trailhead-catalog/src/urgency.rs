use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::departures::DepartureViewEntry;

/// Days ahead of today that count as "departing soon"
pub const DEPARTING_SOON_DAYS: i64 = 45;

/// Remaining spots at or below which a departure is "filling fast"
pub const LOW_SPOTS_THRESHOLD: u32 = 4;

/// Display hint attached to a departure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyTag {
    #[default]
    None,
    FillingFast,
    DepartingSoon,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrgencyThresholds {
    pub departing_soon_days: i64,
    pub low_spots: u32,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            departing_soon_days: DEPARTING_SOON_DAYS,
            low_spots: LOW_SPOTS_THRESHOLD,
        }
    }
}

/// Derives the urgency tag of a departure from the date and remaining capacity.
///
/// "Today" is always passed in; the classifier never reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrgencyClassifier {
    thresholds: UrgencyThresholds,
}

impl UrgencyClassifier {
    pub fn new(thresholds: UrgencyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> UrgencyThresholds {
        self.thresholds
    }

    /// First match wins: departing soon, then filling fast, then none.
    pub fn classify(&self, departure: &DepartureViewEntry, today: NaiveDate) -> UrgencyTag {
        self.classify_parts(departure.start_date, departure.spots_left, today)
    }

    pub fn classify_parts(&self, start_date: NaiveDate, spots_left: u32, today: NaiveDate) -> UrgencyTag {
        // A window too large to represent as a date never matches
        let horizon = TimeDelta::try_days(self.thresholds.departing_soon_days)
            .and_then(|window| today.checked_add_signed(window));

        if today < start_date && horizon.is_some_and(|h| start_date <= h) {
            UrgencyTag::DepartingSoon
        } else if spots_left <= self.thresholds.low_spots {
            UrgencyTag::FillingFast
        } else {
            UrgencyTag::None
        }
    }
}
