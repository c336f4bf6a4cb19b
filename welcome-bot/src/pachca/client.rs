//! reqwest-backed Pachca API client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error, info};
use url::Url;

use super::types::{DataResponse, MessageRequest, OutboundMessage, UserProfile};
use super::ChatApi;
use crate::error::ApiError;

/// Pachca REST API client.
///
/// Holds only the base URL and bearer token, so one instance is shared
/// across all requests.
#[derive(Clone)]
pub struct PachcaClient {
    client: Client,
    token: String,
    base_url: String,
}

impl PachcaClient {
    pub fn new(base_url: &Url, token: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            token: token.to_string(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn add_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    /// Turn a non-2xx response into [`ApiError::Status`] carrying the body text.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ChatApi for PachcaClient {
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), ApiError> {
        debug!(
            entity_type = %message.entity_type,
            entity_id = message.entity_id,
            "pachca_send_message"
        );

        let response = self
            .add_auth(self.client.post(self.endpoint("/messages")))
            .json(&MessageRequest { message })
            .send()
            .await?;

        match Self::check_status(response).await {
            Ok(_) => {
                info!(
                    entity_type = %message.entity_type,
                    entity_id = message.entity_id,
                    "pachca_message_sent"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    entity_type = %message.entity_type,
                    entity_id = message.entity_id,
                    error = %e,
                    "pachca_message_failed"
                );
                Err(e)
            }
        }
    }

    async fn get_user(&self, user_id: u64) -> Result<UserProfile, ApiError> {
        debug!(user_id = user_id, "pachca_get_user");

        let response = self
            .add_auth(self.client.get(self.endpoint(&format!("/users/{}", user_id))))
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let parsed: DataResponse<UserProfile> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(parsed.data)
    }
}
