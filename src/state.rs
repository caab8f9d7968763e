use std::sync::Arc;

use crate::{
    config::AppConfig,
    models::country::CountryOption,
    services::{assistant::Assistant, itinerary::ItineraryPlanner, store::TripStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: TripStore,
    pub assistant: Arc<dyn Assistant>,
    pub planner: ItineraryPlanner,
    pub countries: Arc<Vec<CountryOption>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: TripStore,
        assistant: Arc<dyn Assistant>,
        planner: ItineraryPlanner,
        countries: Vec<CountryOption>,
    ) -> Self {
        Self {
            config,
            store,
            assistant,
            planner,
            countries: Arc::new(countries),
        }
    }
}
