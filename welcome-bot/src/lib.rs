//! Welcome Bot - greets new Pachca team members.
//!
//! Pachca sends outgoing webhooks when someone joins a chat, a thread, or the
//! company. The bot verifies each webhook and posts a welcome message through
//! the Pachca REST API.
//!
//! ## Architecture
//!
//! ```text
//! Pachca → POST /webhook → signature + freshness → greet → Pachca API
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod greet;
pub mod pachca;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use error::{ApiError, WebhookError};
pub use event::WebhookEvent;
pub use greet::{process_event, resolve_alias, welcome_text, Alias, Outcome};
pub use pachca::{ChatApi, EntityType, OutboundMessage, PachcaClient, UserProfile};
pub use web::{router, AppState};
