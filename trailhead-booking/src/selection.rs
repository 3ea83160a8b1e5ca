use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 12;
pub const DEFAULT_GUESTS: u32 = 2;

/// The traveller's current choice on a tour page.
///
/// A custom date and a fixed departure are mutually exclusive: selecting one
/// clears the other. The guest count always stays within
/// [`MIN_GUESTS`]..=[`MAX_GUESTS`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingSelection {
    selected_date: Option<NaiveDate>,
    selected_departure_id: Option<String>,
    guest_count: u32,
}

impl Default for BookingSelection {
    fn default() -> Self {
        Self {
            selected_date: None,
            selected_departure_id: None,
            guest_count: DEFAULT_GUESTS,
        }
    }
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guest_count(guests: u32) -> Self {
        Self {
            guest_count: guests.clamp(MIN_GUESTS, MAX_GUESTS),
            ..Self::default()
        }
    }

    /// Book a private trip on `date`. Availability is not re-checked here.
    pub fn select_custom_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        self.selected_departure_id = None;
    }

    /// Join the fixed departure `id`.
    pub fn select_departure(&mut self, id: impl Into<String>) {
        self.selected_departure_id = Some(id.into());
        self.selected_date = None;
    }

    /// Shift the guest count by `delta`, saturating at the bounds.
    pub fn change_guest_count(&mut self, delta: i32) {
        let next = (self.guest_count as i64 + delta as i64).clamp(MIN_GUESTS as i64, MAX_GUESTS as i64);
        self.guest_count = next as u32;
    }

    pub fn clear(&mut self) {
        self.selected_date = None;
        self.selected_departure_id = None;
    }

    pub fn is_bookable(&self) -> bool {
        self.selected_date.is_some() || self.selected_departure_id.is_some()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_departure_id(&self) -> Option<&str> {
        self.selected_departure_id.as_deref()
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }
}

/// A single user interaction, as replayed by the HTTP layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionAction {
    SelectDate { date: NaiveDate },
    SelectDeparture { id: String },
    ChangeGuests { delta: i32 },
    Clear,
}

impl BookingSelection {
    pub fn apply(&mut self, action: &SelectionAction) {
        match action {
            SelectionAction::SelectDate { date } => self.select_custom_date(*date),
            SelectionAction::SelectDeparture { id } => self.select_departure(id.clone()),
            SelectionAction::ChangeGuests { delta } => self.change_guest_count(*delta),
            SelectionAction::Clear => self.clear(),
        }
    }

    pub fn replay<'a, I>(actions: I) -> Self
    where
        I: IntoIterator<Item = &'a SelectionAction>,
    {
        let mut selection = Self::default();
        for action in actions {
            selection.apply(action);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn exclusive(selection: &BookingSelection) -> bool {
        !(selection.selected_date().is_some() && selection.selected_departure_id().is_some())
    }

    #[test]
    fn test_initial_state() {
        let selection = BookingSelection::new();
        assert_eq!(selection.guest_count(), DEFAULT_GUESTS);
        assert!(!selection.is_bookable());
        assert!(selection.selected_date().is_none());
        assert!(selection.selected_departure_id().is_none());
    }

    #[test]
    fn test_selecting_one_mode_clears_the_other() {
        let mut selection = BookingSelection::new();

        selection.select_custom_date(date(10));
        assert_eq!(selection.selected_date(), Some(date(10)));
        assert!(selection.selected_departure_id().is_none());

        selection.select_departure("d1");
        assert_eq!(selection.selected_departure_id(), Some("d1"));
        assert!(selection.selected_date().is_none());

        selection.select_custom_date(date(12));
        assert!(selection.selected_departure_id().is_none());
        assert!(selection.is_bookable());
    }

    #[test]
    fn test_exclusivity_holds_across_sequences() {
        let mut selection = BookingSelection::new();
        for i in 0..30u32 {
            if i % 3 == 0 {
                selection.select_departure(format!("d{i}"));
            } else {
                selection.select_custom_date(date(1 + i % 28));
            }
            assert!(exclusive(&selection));
            assert!(selection.is_bookable());
        }
    }

    #[test]
    fn test_guest_count_is_clamped() {
        let mut selection = BookingSelection::new();
        selection.change_guest_count(-1);
        assert_eq!(selection.guest_count(), 1);
        selection.change_guest_count(-1);
        assert_eq!(selection.guest_count(), 1);

        selection.change_guest_count(50);
        assert_eq!(selection.guest_count(), MAX_GUESTS);
        selection.change_guest_count(1);
        assert_eq!(selection.guest_count(), MAX_GUESTS);

        selection.change_guest_count(i32::MIN);
        assert_eq!(selection.guest_count(), MIN_GUESTS);

        for delta in [3, -7, 11, 2, -1, 9, -20, 4] {
            selection.change_guest_count(delta);
            assert!((MIN_GUESTS..=MAX_GUESTS).contains(&selection.guest_count()));
        }

        assert_eq!(BookingSelection::with_guest_count(0).guest_count(), MIN_GUESTS);
        assert_eq!(BookingSelection::with_guest_count(40).guest_count(), MAX_GUESTS);
    }

    #[test]
    fn test_replay_actions() {
        let actions = vec![
            SelectionAction::SelectDate { date: date(3) },
            SelectionAction::ChangeGuests { delta: 2 },
            SelectionAction::SelectDeparture { id: "d7".to_string() },
        ];
        let selection = BookingSelection::replay(&actions);
        assert_eq!(selection.selected_departure_id(), Some("d7"));
        assert!(selection.selected_date().is_none());
        assert_eq!(selection.guest_count(), 4);

        let mut cleared = selection.clone();
        cleared.apply(&SelectionAction::Clear);
        assert!(!cleared.is_bookable());
        assert_eq!(cleared.guest_count(), 4);
    }

    #[test]
    fn test_action_wire_format() {
        let json = r#"[
            {"type": "select_date", "date": "2025-09-03"},
            {"type": "change_guests", "delta": -1}
        ]"#;
        let actions: Vec<SelectionAction> = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(actions[0], SelectionAction::SelectDate { date: date(3) });
        assert_eq!(actions[1], SelectionAction::ChangeGuests { delta: -1 });
    }
}
