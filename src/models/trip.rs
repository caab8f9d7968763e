use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored trip document. Field names follow the collection's wire format;
/// `notes` and `tripPlanner` may be absent in documents written before the
/// planner existed, so both default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub country: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub trip_planner: Vec<PlannerItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Partial trip update. Present fields overwrite the stored field wholesale;
/// absent fields are left untouched. The id is never patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    pub country: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<Vec<String>>,
    pub trip_planner: Option<Vec<PlannerItem>>,
}

impl Trip {
    pub fn new(country: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            country: country.into(),
            start_date,
            end_date,
            notes: Vec::new(),
            trip_planner: Vec::new(),
        }
    }

    pub fn apply(&self, patch: &TripPatch) -> Trip {
        let mut next = self.clone();
        if let Some(country) = &patch.country {
            next.country = country.clone();
        }
        if let Some(start_date) = patch.start_date {
            next.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            next.end_date = end_date;
        }
        if let Some(notes) = &patch.notes {
            next.notes = notes.clone();
        }
        if let Some(items) = &patch.trip_planner {
            next.trip_planner = items.clone();
        }
        next
    }

    /// Every calendar day of the trip, inclusive on both ends. An inverted
    /// range yields no days rather than an error.
    pub fn planner_days(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|day| *day <= self.end_date)
            .collect()
    }
}

pub fn add_note(notes: &[String], text: impl Into<String>) -> Vec<String> {
    let mut next = notes.to_vec();
    next.push(text.into());
    next
}

pub fn delete_note(notes: &[String], index: usize) -> Vec<String> {
    if index >= notes.len() {
        return notes.to_vec();
    }
    let mut next = notes.to_vec();
    next.remove(index);
    next
}

pub fn add_planner_item(items: &[PlannerItem], item: PlannerItem) -> Vec<PlannerItem> {
    let mut next = items.to_vec();
    next.push(item);
    next
}

pub fn delete_planner_item(items: &[PlannerItem], index: usize) -> Vec<PlannerItem> {
    if index >= items.len() {
        return items.to_vec();
    }
    let mut next = items.to_vec();
    next.remove(index);
    next
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn trip() -> Trip {
        Trip::new("Japan", date(2025, 4, 1), date(2025, 4, 3))
    }

    #[test]
    fn deleting_the_just_added_note_restores_the_original_sequence() {
        let notes = vec!["pack warm clothes".to_string(), "book museum".to_string()];
        let appended = add_note(&notes, "rent a car");
        let restored = delete_note(&appended, notes.len());
        assert_eq!(restored, notes);
    }

    #[test]
    fn delete_note_out_of_range_is_a_noop() {
        let notes = vec!["only note".to_string()];
        assert_eq!(delete_note(&notes, 1), notes);
        assert_eq!(delete_note(&notes, 99), notes);
    }

    #[test]
    fn delete_planner_item_shifts_later_items_down() {
        let items: Vec<PlannerItem> = ["A", "B", "C"]
            .iter()
            .map(|title| PlannerItem {
                title: title.to_string(),
                description: String::new(),
                date: None,
            })
            .collect();
        let remaining = delete_planner_item(&items, 1);
        let titles: Vec<&str> = remaining.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn apply_leaves_absent_patch_fields_untouched() {
        let original = trip();
        let patched = original.apply(&TripPatch {
            country: Some("Norway".to_string()),
            ..TripPatch::default()
        });
        assert_eq!(patched.country, "Norway");
        assert_eq!(patched.id, original.id);
        assert_eq!(patched.start_date, original.start_date);
        assert_eq!(patched.end_date, original.end_date);
        assert_eq!(patched.notes, original.notes);
        assert_eq!(patched.trip_planner.len(), original.trip_planner.len());
    }

    #[test]
    fn apply_accepts_an_empty_country_without_validation() {
        let patched = trip().apply(&TripPatch {
            country: Some(String::new()),
            ..TripPatch::default()
        });
        assert_eq!(patched.country, "");
    }

    #[test]
    fn planner_days_covers_the_range_inclusively() {
        let days = trip().planner_days();
        assert_eq!(
            days,
            vec![date(2025, 4, 1), date(2025, 4, 2), date(2025, 4, 3)]
        );
    }

    #[test]
    fn planner_days_of_a_single_day_trip_is_that_day() {
        let trip = Trip::new("Japan", date(2025, 4, 1), date(2025, 4, 1));
        assert_eq!(trip.planner_days(), vec![date(2025, 4, 1)]);
    }

    #[test]
    fn planner_days_of_an_inverted_range_is_empty() {
        let trip = Trip::new("Japan", date(2025, 4, 3), date(2025, 4, 1));
        assert!(trip.planner_days().is_empty());
    }

    #[test]
    fn format_date_matches_the_planner_title_style() {
        assert_eq!(format_date(date(2025, 4, 1)), "April 1, 2025");
    }

    #[test]
    fn stored_documents_without_a_planner_deserialize_with_an_empty_one() {
        let raw = r#"{
            "id": "t-1",
            "country": "japan",
            "startDate": "2025-04-01",
            "endDate": "2025-04-03",
            "notes": []
        }"#;
        let trip: Trip = serde_json::from_str(raw).expect("legacy document");
        assert!(trip.trip_planner.is_empty());
    }
}
