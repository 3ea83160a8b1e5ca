use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use trailhead_shared::SeasonalPrice;

use crate::urgency::{UrgencyClassifier, UrgencyTag, LOW_SPOTS_THRESHOLD};

fn default_low_spots() -> u32 {
    LOW_SPOTS_THRESHOLD
}

/// Capacity shown for a departure when no booking counts are known
pub const PLACEHOLDER_SPOTS_LEFT: u32 = 10;

/// Month labels indexed by the zero-based month used in [`DepartureCatalog::filter`]
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A fixed departure prepared for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartureViewEntry {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub label: Option<String>,
    pub spots_left: u32,
    pub urgency: UrgencyTag,
    /// Threshold of the classifier that last annotated this entry
    #[serde(skip, default = "default_low_spots")]
    low_spots_threshold: u32,
}

impl DepartureViewEntry {
    fn from_departure(departure: &SeasonalPrice, spots_left: u32) -> Self {
        Self {
            id: departure.id.clone(),
            start_date: departure.start_date,
            end_date: departure.end_date,
            price: departure.price,
            label: departure.label.clone(),
            spots_left,
            urgency: UrgencyTag::None,
            low_spots_threshold: LOW_SPOTS_THRESHOLD,
        }
    }

    pub fn is_low_on_spots(&self) -> bool {
        self.spots_left <= self.low_spots_threshold
    }

    pub fn spots_label(&self) -> String {
        if self.is_low_on_spots() {
            format!("Only {} spots left!", self.spots_left)
        } else {
            format!("{} spots available", self.spots_left)
        }
    }
}

/// Sorted, filterable view over a tour's fixed departures
#[derive(Debug, Clone, Default)]
pub struct DepartureCatalog {
    entries: Vec<DepartureViewEntry>,
}

impl DepartureCatalog {
    /// Build the catalog with the placeholder capacity on every entry.
    pub fn new(departures: &[SeasonalPrice]) -> Self {
        Self::with_spots(departures, |_| PLACEHOLDER_SPOTS_LEFT)
    }

    /// Build the catalog with a caller-supplied spots figure per departure.
    pub fn with_spots<F>(departures: &[SeasonalPrice], spots_for: F) -> Self
    where
        F: Fn(&SeasonalPrice) -> u32,
    {
        let mut entries: Vec<DepartureViewEntry> = departures
            .iter()
            .map(|d| DepartureViewEntry::from_departure(d, spots_for(d)))
            .collect();

        // Stable: departures sharing a start date keep their input order
        entries.sort_by_key(|e| e.start_date);

        tracing::debug!(departures = entries.len(), "Built departure catalog");
        Self { entries }
    }

    /// Attach urgency tags relative to `today`. Spots labels follow the
    /// classifier's low-spots threshold from here on.
    pub fn annotate(mut self, classifier: &UrgencyClassifier, today: NaiveDate) -> Self {
        let low_spots = classifier.thresholds().low_spots;
        for entry in &mut self.entries {
            entry.urgency = classifier.classify(entry, today);
            entry.low_spots_threshold = low_spots;
        }
        self
    }

    pub fn entries(&self) -> &[DepartureViewEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DepartureViewEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching both the year and the zero-based month (0 = January).
    /// `None` matches everything for that component.
    pub fn filter(&self, year: Option<i32>, month: Option<u32>) -> Vec<DepartureViewEntry> {
        self.entries
            .iter()
            .filter(|e| {
                let year_match = year.map_or(true, |y| e.start_date.year() == y);
                let month_match = month.map_or(true, |m| e.start_date.month0() == m);
                year_match && month_match
            })
            .cloned()
            .collect()
    }

    /// Sorted unique start years across every entry, ignoring any filter
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.entries.iter().map(|e| e.start_date.year()).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Start dates offered on the private-trip calendar
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.entries.iter().map(|e| e.start_date).collect()
    }
}
