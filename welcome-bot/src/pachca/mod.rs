//! Outbound side: the two Pachca REST endpoints the bot calls.
//!
//! Handlers depend on the [`ChatApi`] trait rather than the concrete
//! [`PachcaClient`], so tests can swap in a recording fake.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::ApiError;

pub use client::PachcaClient;
pub use types::{EntityType, OutboundMessage, UserProfile};

/// Operations the bot needs from the chat platform.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /messages`
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), ApiError>;

    /// `GET /users/{id}`
    async fn get_user(&self, user_id: u64) -> Result<UserProfile, ApiError>;
}

#[cfg(test)]
pub(crate) mod fake;
