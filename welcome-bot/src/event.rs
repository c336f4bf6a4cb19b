//! Inbound webhook payload sent by Pachca's outgoing webhooks.
//!
//! The payload is decoded as untyped JSON first and the fields the bot acts
//! on are picked out leniently: a field with an unexpected shape reads as
//! absent instead of failing the request. Only invalid JSON is rejected.
//!
//! Zero-valued ids and timestamps read as absent too, so `thread_id: 0`
//! falls back to the chat and `user_ids: [0]` greets nobody in particular.

use serde::Deserialize;
use serde_json::Value;

/// Event category for membership changes in a chat or thread.
pub const CHAT_MEMBER: &str = "chat_member";

/// Event category for company membership changes.
pub const COMPANY_MEMBER: &str = "company_member";

/// A single outgoing-webhook event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct WebhookEvent {
    /// Event category, e.g. `chat_member` or `company_member`
    pub kind: String,

    /// Action within the category, e.g. `add` or `confirm`
    pub event: String,

    /// Unix epoch seconds when Pachca sent the webhook, integer or float
    pub webhook_timestamp: Option<f64>,

    pub chat_id: Option<u64>,

    /// Set when the membership change happened inside a thread
    pub thread_id: Option<u64>,

    /// Leading numeric entries of `user_ids`
    pub user_ids: Vec<u64>,
}

impl From<Value> for WebhookEvent {
    fn from(value: Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let id = |key: &str| value.get(key).and_then(Value::as_u64).filter(|id| *id != 0);

        // Stop at the first non-numeric entry so `first_user` stays positional
        let user_ids: Vec<u64> = value
            .get("user_ids")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().map_while(Value::as_u64).collect())
            .unwrap_or_default();

        WebhookEvent {
            kind: text("type"),
            event: text("event"),
            webhook_timestamp: value.get("webhook_timestamp").and_then(Value::as_f64),
            chat_id: id("chat_id"),
            thread_id: id("thread_id"),
            user_ids,
        }
    }
}

impl WebhookEvent {
    /// The user the greeting is addressed to.
    ///
    /// Only the first id is used; batch additions greet a single member.
    pub fn first_user(&self) -> Option<u64> {
        self.user_ids.first().copied().filter(|id| *id != 0)
    }

    /// Send timestamp, treating a zero value as absent.
    pub fn sent_at(&self) -> Option<f64> {
        self.webhook_timestamp.filter(|ts| *ts != 0.0)
    }

    pub fn is(&self, kind: &str, event: &str) -> bool {
        self.kind == kind && self.event == event
    }
}
