use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    error::AppError,
    models::trip::{add_planner_item, format_date, PlannerItem, TripPatch},
    services::{assistant::Assistant, store::TripStore},
};

const PLANNER_SYSTEM_PROMPT: &str = "You are a travel planning assistant. \
Suggest a short, concrete plan for a single day of a trip. Answer in plain text.";

/// Day-by-day itinerary generation: one completion request per calendar day
/// of the trip, issued strictly in order with each request awaited before the
/// next. There is no cancellation once a run has started.
#[derive(Clone)]
pub struct ItineraryPlanner {
    store: TripStore,
    assistant: Arc<dyn Assistant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub generated: usize,
    pub skipped: usize,
}

impl ItineraryPlanner {
    pub fn new(store: TripStore, assistant: Arc<dyn Assistant>) -> Self {
        Self { store, assistant }
    }

    pub async fn generate(
        &self,
        trip_id: &str,
        preferences: &str,
    ) -> Result<GenerationReport, AppError> {
        let trip = self.store.get(trip_id).await?.ok_or(AppError::NotFound)?;
        let mut report = GenerationReport::default();

        // An inverted date range enumerates no days, so no requests go out.
        for (offset, day) in trip.planner_days().into_iter().enumerate() {
            let index = offset + 1;
            let prompt = day_prompt(index, day, &trip.country, preferences);
            match self.assistant.complete(PLANNER_SYSTEM_PROMPT, &prompt).await {
                Ok(description) => {
                    let item = PlannerItem {
                        title: format!("Day {index} ({})", format_date(day)),
                        description,
                        date: Some(day),
                    };
                    // Items land incrementally, one write per day, never as a
                    // batch at the end of the run.
                    let Some(current) = self.store.get(trip_id).await? else {
                        warn!(trip = %trip_id, "trip disappeared mid-generation");
                        return Ok(report);
                    };
                    let items = add_planner_item(&current.trip_planner, item);
                    let patch = TripPatch {
                        trip_planner: Some(items),
                        ..TripPatch::default()
                    };
                    self.store.update(trip_id, &patch).await?;
                    report.generated += 1;
                }
                Err(err) => {
                    // A failed day is skipped; the remaining days still get
                    // their own requests.
                    warn!(trip = %trip_id, day = %day, "itinerary request failed: {err}");
                    report.skipped += 1;
                }
            }
        }

        info!(
            trip = %trip_id,
            generated = report.generated,
            skipped = report.skipped,
            "itinerary generation finished"
        );
        Ok(report)
    }
}

fn day_prompt(index: usize, day: NaiveDate, country: &str, preferences: &str) -> String {
    let mut prompt = format!(
        "Suggest a plan for day {index} ({}) of a trip to {country}.",
        format_date(day)
    );
    let preferences = preferences.trim();
    if !preferences.is_empty() {
        prompt.push_str(&format!(" The traveller's preferences: {preferences}"));
    }
    prompt
}
