use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::warn;

use super::trips::normalize_optional;
use crate::{error::AppError, services::assistant::Assistant, state::AppState};

const ASK_SYSTEM_PROMPT: &str =
    "You are a helpful travel assistant. Answer the traveller's question concisely.";

pub fn router() -> Router<AppState> {
    Router::new().route("/ask", get(ask_form).post(ask_submit))
}

#[derive(Template)]
#[template(path = "ask.html")]
struct AskTemplate {
    question: String,
    answer: String,
    has_answer: bool,
    show_error: bool,
    error_message: String,
}

async fn ask_form() -> impl IntoResponse {
    AskamaTemplateResponse::into_response(AskTemplate {
        question: String::new(),
        answer: String::new(),
        has_answer: false,
        show_error: false,
        error_message: String::new(),
    })
}

#[derive(Deserialize)]
struct AskForm {
    question: String,
}

async fn ask_submit(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> Result<Response, AppError> {
    let Some(question) = normalize_optional(Some(form.question)) else {
        return Ok(Redirect::to("/ask").into_response());
    };

    match state.assistant.complete(ASK_SYSTEM_PROMPT, &question).await {
        Ok(answer) => Ok(AskamaTemplateResponse::into_response(AskTemplate {
            question,
            answer,
            has_answer: true,
            show_error: false,
            error_message: String::new(),
        })),
        Err(err) => {
            warn!("ask request failed: {err}");
            Ok((
                StatusCode::BAD_GATEWAY,
                AskamaTemplateResponse::into_response(AskTemplate {
                    question,
                    answer: String::new(),
                    has_answer: false,
                    show_error: true,
                    error_message: "The assistant is unavailable right now.".into(),
                }),
            )
                .into_response())
        }
    }
}
