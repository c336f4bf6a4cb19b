//! Web server module for handling Pachca webhooks.
//!
//! This module provides the HTTP surface of the bot:
//! - `POST /webhook` receives signed outgoing-webhook events
//! - `GET /` and `GET /health` answer liveness probes
//!
//! Authentication and replay checks live in [`signature`].

pub mod handlers;
pub mod signature;

pub use handlers::{health, pachca_webhook, root, router, AppState, HealthResponse};
pub use signature::{is_fresh, verify_signature, SIGNATURE_HEADER};
