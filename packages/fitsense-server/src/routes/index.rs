use crate::error::AppError;
use crate::routes::{Reply, created};
use crate::services::users;
use crate::state::AppState;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::IntoResponse;
use fitsense_core::{SignupInput, SignupResponse, parse_height, parse_weight};
use serde::Deserialize;
use std::sync::Arc;

/// Raw signup form; every field arrives as text.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignupForm {
    height: Option<String>,
    weight: Option<String>,
    plan: Option<String>,
    activity: Option<String>,
    workout: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required field: {field}")))
}

impl TryFrom<SignupForm> for SignupInput {
    type Error = AppError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        Ok(SignupInput {
            height: parse_height(&required(form.height, "height")?)?,
            weight: parse_weight(&required(form.weight, "weight")?)?,
            plan: required(form.plan, "plan")?.parse()?,
            activity: required(form.activity, "activity")?.parse()?,
            workout: required(form.workout, "workout")?,
            username: form.username,
            password: form.password,
        })
    }
}

pub(crate) async fn signup(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SignupForm>, FormRejection>,
) -> Reply<SignupResponse> {
    let Form(form) = form?;
    let input = SignupInput::try_from(form)?;
    created(users::signup(&state, input).await?)
}

pub(crate) async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
