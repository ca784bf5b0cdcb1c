use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub(crate) fn axum_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(routes::index::signup))
        .route("/health", get(routes::index::health))
        .route("/generate", post(routes::generate::generate))
        .nest("/users", routes::users::router())
        .nest("/workouts", routes::workouts::router())
        .nest("/exercises", routes::exercises::router())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}
