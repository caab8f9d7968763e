use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use wayfare::config::AppConfig;
use wayfare::error::AppError;
use wayfare::routes::create_router;
use wayfare::services::{
    assistant::{Assistant, ChatApi},
    countries::CountryDirectory,
    itinerary::ItineraryPlanner,
    store::TripStore,
};
use wayfare::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let store = TripStore::new(config.data_root.clone());
    store.ensure_structure().await?;

    let directory = CountryDirectory::new(config.countries_url.clone());
    let countries = match directory.fetch_all().await {
        Ok(options) => options,
        Err(err) => {
            // The trip form falls back to a free-text input when this stays empty.
            error!("country directory fetch failed: {err}");
            Vec::new()
        }
    };

    let assistant: Arc<dyn Assistant> = Arc::new(ChatApi::new(&config));
    let planner = ItineraryPlanner::new(store.clone(), assistant.clone());

    let state = AppState::new(config.clone(), store, assistant, planner, countries);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,wayfare=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
