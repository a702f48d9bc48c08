use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use revela::athletes::{athlete_router, AthleteRepository, KeyValueStore, VerificationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_athlete_routes<R, S>(service: Arc<VerificationService<R, S>>) -> axum::Router
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    athlete_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryAthleteRepository, InMemoryKeyValueStore};
    use axum::body::Body;
    use axum::http::Request;
    use revela::config::StreakConfig;
    use tower::ServiceExt;

    fn service() -> Arc<VerificationService<InMemoryAthleteRepository, InMemoryKeyValueStore>> {
        Arc::new(VerificationService::new(
            Arc::new(InMemoryAthleteRepository::default()),
            Arc::new(InMemoryKeyValueStore::default()),
            &StreakConfig::default(),
        ))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn merged_router_keeps_athlete_routes() {
        let router = with_athlete_routes(service());

        let response = router
            .oneshot(
                Request::get("/api/v1/athletes/unknown/progress?today=2025-03-01")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let router = with_athlete_routes(service());

        let response = router
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
