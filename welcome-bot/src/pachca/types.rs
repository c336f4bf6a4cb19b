//! Wire types for the Pachca REST API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target classification for an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// A chat (discussion)
    Discussion,
    /// A thread inside a chat
    Thread,
    /// Direct message to a user
    User,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Discussion => "discussion",
            EntityType::Thread => "thread",
            EntityType::User => "user",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message submitted to `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub entity_type: EntityType,
    pub entity_id: u64,
    pub content: String,
}

impl OutboundMessage {
    pub fn new(entity_type: EntityType, entity_id: u64, content: impl Into<String>) -> Self {
        Self {
            entity_type,
            entity_id,
            content: content.into(),
        }
    }
}

/// Request body envelope for `POST /messages`.
#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    pub message: &'a OutboundMessage,
}

/// Profile fields returned by `GET /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Response envelope wrapping API payloads in a `data` field.
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
