//! Greeting dispatch.
//!
//! Routes a verified [`WebhookEvent`] by its (type, event) pair:
//!
//! ```text
//! chat_member/add         → welcome in the thread or chat
//! company_member/confirm  → welcome in a direct message
//! anything else           → ignored
//! ```

pub mod alias;
pub mod message;

use tracing::info;

use crate::error::WebhookError;
use crate::event::{WebhookEvent, CHAT_MEMBER, COMPANY_MEMBER};
use crate::pachca::{ChatApi, EntityType, OutboundMessage};

pub use alias::{resolve_alias, Alias, FALLBACK_ALIAS};
pub use message::welcome_text;

/// What the dispatcher did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Greeted {
        entity_type: EntityType,
        entity_id: u64,
    },
    Ignored,
}

/// Where to post the greeting and whom it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingPlan {
    pub entity_type: EntityType,
    pub entity_id: u64,
    pub user_id: Option<u64>,
}

/// Decide whether an event warrants a greeting, without any I/O.
pub fn plan_greeting(event: &WebhookEvent) -> Result<Option<GreetingPlan>, WebhookError> {
    if event.is(CHAT_MEMBER, "add") {
        let (entity_type, entity_id) = match (event.thread_id, event.chat_id) {
            (Some(thread_id), _) => (EntityType::Thread, thread_id),
            (None, Some(chat_id)) => (EntityType::Discussion, chat_id),
            (None, None) => {
                return Err(WebhookError::MalformedPayload(
                    "chat_member event without chat_id".to_string(),
                ))
            }
        };

        return Ok(Some(GreetingPlan {
            entity_type,
            entity_id,
            user_id: event.first_user(),
        }));
    }

    if event.is(COMPANY_MEMBER, "confirm") {
        return Ok(event.first_user().map(|user_id| GreetingPlan {
            entity_type: EntityType::User,
            entity_id: user_id,
            user_id: Some(user_id),
        }));
    }

    Ok(None)
}

/// Process a verified event, sending at most one welcome message.
pub async fn process_event(api: &dyn ChatApi, event: &WebhookEvent) -> Result<Outcome, WebhookError> {
    let plan = match plan_greeting(event)? {
        Some(plan) => plan,
        None => {
            info!(kind = %event.kind, event = %event.event, "event_ignored");
            return Ok(Outcome::Ignored);
        }
    };

    let alias = match plan.user_id {
        Some(user_id) => resolve_alias(api, user_id).await.as_str().to_string(),
        None => String::new(),
    };

    let message = OutboundMessage::new(plan.entity_type, plan.entity_id, welcome_text(&alias));
    api.send_message(&message).await?;

    info!(
        kind = %event.kind,
        event = %event.event,
        entity_type = %plan.entity_type,
        entity_id = plan.entity_id,
        user_id = ?plan.user_id,
        "greeting_sent"
    );

    Ok(Outcome::Greeted {
        entity_type: plan.entity_type,
        entity_id: plan.entity_id,
    })
}
