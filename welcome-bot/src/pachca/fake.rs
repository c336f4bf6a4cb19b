//! Recording in-memory [`ChatApi`] used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatApi, OutboundMessage, UserProfile};
use crate::error::ApiError;

#[derive(Default)]
pub(crate) struct FakeChatApi {
    users: HashMap<u64, UserProfile>,
    fail_sends: bool,
    sent: Mutex<Vec<OutboundMessage>>,
    lookups: Mutex<Vec<u64>>,
}

impl FakeChatApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(mut self, id: u64, profile: UserProfile) -> Self {
        self.users.insert(id, profile);
        self
    }

    pub(crate) fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub(crate) fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn lookups(&self) -> Vec<u64> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), ApiError> {
        if self.fail_sends {
            return Err(ApiError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: u64) -> Result<UserProfile, ApiError> {
        self.lookups.lock().unwrap().push(user_id);
        self.users.get(&user_id).cloned().ok_or(ApiError::Status {
            status: 404,
            body: "not found".to_string(),
        })
    }
}

pub(crate) fn profile(nickname: Option<&str>, first: Option<&str>, last: Option<&str>) -> UserProfile {
    UserProfile {
        nickname: nickname.map(str::to_string),
        first_name: first.map(str::to_string),
        last_name: last.map(str::to_string),
    }
}
