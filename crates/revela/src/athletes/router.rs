use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{AthleteId, AthleteProfile, CompletedTest};
use super::repository::{AthleteRepository, RepositoryError};
use super::service::{VerificationService, VerificationServiceError};
use super::streak::{KeyValueStore, StreakError};

/// Router builder exposing profile, test, progress, and streak endpoints.
pub fn athlete_router<R, S>(service: Arc<VerificationService<R, S>>) -> Router
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/athletes/:athlete_id/profile",
            put(save_profile_handler::<R, S>),
        )
        .route(
            "/api/v1/athletes/:athlete_id/tests",
            post(record_test_handler::<R, S>),
        )
        .route(
            "/api/v1/athletes/:athlete_id/progress",
            get(progress_handler::<R, S>),
        )
        .route(
            "/api/v1/athletes/:athlete_id/completeness",
            get(completeness_handler::<R, S>),
        )
        .route(
            "/api/v1/athletes/:athlete_id/check-in",
            post(check_in_handler::<R, S>),
        )
        .route("/api/v1/progress/evaluate", post(evaluate_handler::<R, S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DayQuery {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

impl DayQuery {
    fn resolve(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Stateless evaluation request. Both fields are optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    pub(crate) profile: Value,
    #[serde(default)]
    pub(crate) completed_tests: Value,
}

pub(crate) async fn save_profile_handler<R, S>(
    State(service): State<Arc<VerificationService<R, S>>>,
    Path(athlete_id): Path<String>,
    axum::Json(profile): axum::Json<AthleteProfile>,
) -> Response
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    match service.save_profile(&AthleteId(athlete_id), profile) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_test_handler<R, S>(
    State(service): State<Arc<VerificationService<R, S>>>,
    Path(athlete_id): Path<String>,
    axum::Json(test): axum::Json<CompletedTest>,
) -> Response
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    let id = AthleteId(athlete_id);
    match service.record_test(&id, test) {
        Ok(count) => {
            let payload = json!({
                "athlete_id": id.0,
                "completed_tests": count,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<R, S>(
    State(service): State<Arc<VerificationService<R, S>>>,
    Path(athlete_id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Response
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    match service.progress(&AthleteId(athlete_id), query.resolve()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn completeness_handler<R, S>(
    State(service): State<Arc<VerificationService<R, S>>>,
    Path(athlete_id): Path<String>,
) -> Response
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    let id = AthleteId(athlete_id);
    match service.completeness(&id) {
        Ok(profile_completeness) => {
            let payload = json!({
                "athlete_id": id.0,
                "profile_completeness": profile_completeness,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_in_handler<R, S>(
    State(service): State<Arc<VerificationService<R, S>>>,
    Path(athlete_id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Response
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    match service.check_in(&AthleteId(athlete_id), query.resolve()) {
        Ok(streak) => (StatusCode::OK, axum::Json(streak)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler<R, S>(
    State(service): State<Arc<VerificationService<R, S>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    let completed_tests = request
        .completed_tests
        .as_u64()
        .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
        .unwrap_or(0);
    let result = service
        .evaluator()
        .evaluate_snapshot(&request.profile, completed_tests);
    (StatusCode::OK, axum::Json(result)).into_response()
}

fn error_response(error: VerificationServiceError) -> Response {
    let status = match &error {
        VerificationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        VerificationServiceError::Repository(RepositoryError::Unavailable(_))
        | VerificationServiceError::Streak(StreakError::Store(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        VerificationServiceError::Streak(StreakError::Encode(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
