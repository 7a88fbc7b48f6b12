//! HTTP surface for verification intake and alert review.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::ledger::{AlertPublisher, AuditSink};
use super::registry::IdentityRegistry;
use super::service::{VerificationError, VerificationRequest, VerificationService};

const ALERT_LISTING_LIMIT: usize = 50;

/// Router builder exposing the verification endpoints.
pub fn verification_router<G, A, L>(service: Arc<VerificationService<G, A, L>>) -> Router
where
    G: IdentityRegistry + 'static,
    A: AlertPublisher + 'static,
    L: AuditSink + 'static,
{
    Router::new()
        .route("/api/v1/verifications", post(verify_handler::<G, A, L>))
        .route("/api/v1/alerts", get(alerts_handler::<G, A, L>))
        .with_state(service)
}

pub(crate) async fn verify_handler<G, A, L>(
    State(service): State<Arc<VerificationService<G, A, L>>>,
    axum::Json(request): axum::Json<VerificationRequest>,
) -> Response
where
    G: IdentityRegistry + 'static,
    A: AlertPublisher + 'static,
    L: AuditSink + 'static,
{
    match service.verify(request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(VerificationError::Signal(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn alerts_handler<G, A, L>(
    State(service): State<Arc<VerificationService<G, A, L>>>,
) -> Response
where
    G: IdentityRegistry + 'static,
    A: AlertPublisher + 'static,
    L: AuditSink + 'static,
{
    match service.recent_alerts(ALERT_LISTING_LIMIT) {
        Ok(alerts) => (StatusCode::OK, axum::Json(alerts)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
