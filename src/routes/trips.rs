use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{
        country::CountryOption,
        trip::{
            add_note, add_planner_item, delete_note, delete_planner_item, format_date,
            PlannerItem, Trip, TripPatch,
        },
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trips_list))
        .route("/trips/new", get(trip_new_form).post(trip_new_submit))
        .route("/trips/:id", get(trip_detail))
        .route("/trips/:id/edit", post(trip_edit))
        .route("/trips/:id/delete", post(trip_delete))
        .route("/trips/:id/notes", post(note_add))
        .route("/trips/:id/notes/:index/delete", post(note_delete))
        .route("/trips/:id/planner", post(planner_item_add))
        .route("/trips/:id/planner/:index/delete", post(planner_item_delete))
        .route("/trips/:id/planner/generate", post(planner_generate))
}

#[derive(Clone)]
struct TripCard {
    id: String,
    country: String,
    date_range: String,
    note_count: usize,
    planner_count: usize,
}

#[derive(Template)]
#[template(path = "trips_list.html")]
struct TripsListTemplate {
    trips: Vec<TripCard>,
}

async fn trips_list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let trips = state.store.list().await?;
    let cards = trips
        .into_iter()
        .map(|trip| TripCard {
            date_range: format_date_range(trip.start_date, trip.end_date),
            note_count: trip.notes.len(),
            planner_count: trip.trip_planner.len(),
            id: trip.id,
            country: trip.country,
        })
        .collect();
    Ok(AskamaTemplateResponse::into_response(TripsListTemplate {
        trips: cards,
    }))
}

#[derive(Template)]
#[template(path = "trip_new.html")]
struct TripNewTemplate {
    has_countries: bool,
    countries: Vec<CountryOption>,
    country: String,
    start_date: String,
    end_date: String,
    show_error: bool,
    error_message: String,
}

async fn trip_new_form(State(state): State<AppState>) -> impl IntoResponse {
    AskamaTemplateResponse::into_response(TripNewTemplate {
        has_countries: !state.countries.is_empty(),
        countries: state.countries.as_ref().clone(),
        country: String::new(),
        start_date: String::new(),
        end_date: String::new(),
        show_error: false,
        error_message: String::new(),
    })
}

#[derive(Deserialize)]
struct TripForm {
    country: String,
    start_date: String,
    end_date: String,
}

async fn trip_new_submit(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<Response, AppError> {
    let fields = (
        normalize_optional(Some(form.country.clone())),
        parse_date(&form.start_date),
        parse_date(&form.end_date),
    );
    let (Some(country), Some(start_date), Some(end_date)) = fields else {
        return Ok(render_trip_form_error(
            &state,
            form,
            "Please fill out all the required fields.".into(),
        ));
    };

    // Nothing enforces start_date <= end_date; an inverted range simply
    // produces an empty itinerary later.
    let trip = Trip::new(country, start_date, end_date);
    state.store.insert(trip.clone()).await?;
    Ok(Redirect::to(&format!("/trips/{}", trip.id)).into_response())
}

fn render_trip_form_error(state: &AppState, form: TripForm, message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        AskamaTemplateResponse::into_response(TripNewTemplate {
            has_countries: !state.countries.is_empty(),
            countries: state.countries.as_ref().clone(),
            country: form.country,
            start_date: form.start_date,
            end_date: form.end_date,
            show_error: true,
            error_message: message,
        }),
    )
        .into_response()
}

#[derive(Clone)]
struct NoteRow {
    index: usize,
    text: String,
}

#[derive(Clone)]
struct PlannerRow {
    index: usize,
    title: String,
    description: String,
    has_date: bool,
    date_text: String,
}

#[derive(Template)]
#[template(path = "trip_detail.html")]
struct TripDetailTemplate {
    trip_id: String,
    country: String,
    date_range: String,
    start_date: String,
    end_date: String,
    notes: Vec<NoteRow>,
    planner: Vec<PlannerRow>,
}

async fn trip_detail(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trip = state.store.get(&trip_id).await?.ok_or(AppError::NotFound)?;

    let notes = trip
        .notes
        .iter()
        .enumerate()
        .map(|(index, text)| NoteRow {
            index,
            text: text.clone(),
        })
        .collect();
    let planner = trip
        .trip_planner
        .iter()
        .enumerate()
        .map(|(index, item)| PlannerRow {
            index,
            title: item.title.clone(),
            description: item.description.clone(),
            has_date: item.date.is_some(),
            date_text: item.date.map(format_date).unwrap_or_default(),
        })
        .collect();

    Ok(AskamaTemplateResponse::into_response(TripDetailTemplate {
        date_range: format_date_range(trip.start_date, trip.end_date),
        start_date: trip.start_date.to_string(),
        end_date: trip.end_date.to_string(),
        trip_id: trip.id,
        country: trip.country,
        notes,
        planner,
    }))
}

#[derive(Deserialize)]
struct TripEditForm {
    country: String,
    start_date: String,
    end_date: String,
}

async fn trip_edit(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<TripEditForm>,
) -> Result<Redirect, AppError> {
    // Blank form entries leave the stored field as-is; only present values
    // overwrite, one field at a time.
    let patch = TripPatch {
        country: normalize_optional(Some(form.country)),
        start_date: parse_date(&form.start_date),
        end_date: parse_date(&form.end_date),
        ..TripPatch::default()
    };
    state
        .store
        .update(&trip_id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Redirect::to(&format!("/trips/{trip_id}")))
}

async fn trip_delete(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.delete(&trip_id).await?;
    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
struct NoteForm {
    note: String,
}

async fn note_add(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, AppError> {
    // An empty note is rejected here, before any mutation function runs.
    if let Some(text) = normalize_optional(Some(form.note)) {
        let trip = state.store.get(&trip_id).await?.ok_or(AppError::NotFound)?;
        let patch = TripPatch {
            notes: Some(add_note(&trip.notes, text)),
            ..TripPatch::default()
        };
        state.store.update(&trip_id, &patch).await?;
    }
    Ok(Redirect::to(&format!("/trips/{trip_id}")))
}

async fn note_delete(
    State(state): State<AppState>,
    Path((trip_id, index)): Path<(String, usize)>,
) -> Result<Redirect, AppError> {
    let trip = state.store.get(&trip_id).await?.ok_or(AppError::NotFound)?;
    let patch = TripPatch {
        notes: Some(delete_note(&trip.notes, index)),
        ..TripPatch::default()
    };
    state.store.update(&trip_id, &patch).await?;
    Ok(Redirect::to(&format!("/trips/{trip_id}")))
}

#[derive(Deserialize)]
struct PlannerItemForm {
    title: String,
    description: String,
    date: Option<String>,
}

async fn planner_item_add(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<PlannerItemForm>,
) -> Result<Redirect, AppError> {
    let Some(title) = normalize_optional(Some(form.title)) else {
        return Err(AppError::BadRequest("planner item title is required".into()));
    };
    let item = PlannerItem {
        title,
        description: form.description.trim().to_string(),
        date: form.date.as_deref().and_then(parse_date),
    };
    let trip = state.store.get(&trip_id).await?.ok_or(AppError::NotFound)?;
    let patch = TripPatch {
        trip_planner: Some(add_planner_item(&trip.trip_planner, item)),
        ..TripPatch::default()
    };
    state.store.update(&trip_id, &patch).await?;
    Ok(Redirect::to(&format!("/trips/{trip_id}")))
}

async fn planner_item_delete(
    State(state): State<AppState>,
    Path((trip_id, index)): Path<(String, usize)>,
) -> Result<Redirect, AppError> {
    let trip = state.store.get(&trip_id).await?.ok_or(AppError::NotFound)?;
    let patch = TripPatch {
        trip_planner: Some(delete_planner_item(&trip.trip_planner, index)),
        ..TripPatch::default()
    };
    state.store.update(&trip_id, &patch).await?;
    Ok(Redirect::to(&format!("/trips/{trip_id}")))
}

#[derive(Deserialize)]
struct GenerateForm {
    #[serde(default)]
    preferences: String,
}

async fn planner_generate(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<GenerateForm>,
) -> Result<Redirect, AppError> {
    // Runs to completion before responding; there is no way to abort a
    // generation once it has started.
    state.planner.generate(&trip_id, &form.preferences).await?;
    Ok(Redirect::to(&format!("/trips/{trip_id}")))
}

pub fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}
