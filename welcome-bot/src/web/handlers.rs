//! HTTP endpoint handlers.
//!
//! The webhook handler runs the checks in a fixed order:
//! 1. Signature present
//! 2. Signature matches the raw body
//! 3. Body parses as a [`WebhookEvent`]
//! 4. Timestamp is fresh
//! 5. Dispatch to the greeting logic

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::WebhookError;
use crate::event::WebhookEvent;
use crate::greet::{process_event, Outcome};
use crate::pachca::ChatApi;
use crate::web::signature::{drift, is_fresh, unix_now, verify_signature, SIGNATURE_HEADER};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: Arc<dyn ChatApi>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn ChatApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
        }
    }
}

/// Build the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/webhook", post(pachca_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Plain-text liveness probe.
pub async fn root() -> &'static str {
    "OK"
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Pachca Webhook
// =============================================================================

/// Pachca outgoing webhook endpoint.
///
/// The body is taken as raw bytes because the signature covers the exact
/// bytes Pachca sent.
pub async fn pachca_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookError> {
    let result = handle_webhook(&state, &headers, &body).await;

    match &result {
        Ok(outcome) => {
            info!(outcome = ?outcome, "webhook_handled");
        }
        Err(e @ WebhookError::Downstream(_)) => {
            error!(error = %e, "webhook_processing_failed");
        }
        Err(e) => {
            warn!(error = %e, status = e.status().as_u16(), "webhook_rejected");
        }
    }

    result.map(|_| StatusCode::OK)
}

async fn handle_webhook(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Outcome, WebhookError> {
    info!(body_length = body.len(), "webhook_received");

    let signature = match headers.get(SIGNATURE_HEADER) {
        None => return Err(WebhookError::MissingSignature),
        Some(value) if value.is_empty() => return Err(WebhookError::MissingSignature),
        Some(value) => value.to_str().map_err(|_| WebhookError::InvalidSignature)?,
    };

    if !verify_signature(&state.config.signing_secret, body, signature) {
        return Err(WebhookError::InvalidSignature);
    }

    let event: WebhookEvent =
        serde_json::from_slice(body).map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

    let now = unix_now();
    if !is_fresh(event.sent_at(), now, state.config.webhook_max_age) {
        let age_secs = event
            .sent_at()
            .map(|ts| drift(ts, now) as u64)
            .unwrap_or_default();
        return Err(WebhookError::Stale { age_secs });
    }

    info!(kind = %event.kind, event = %event.event, "webhook_verified");

    process_event(state.api.as_ref(), &event).await
}
