//! REST client for the TalentBridge chat backend

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::base::{ApiError, ApiResult, ChatApi};
use talentbridge_core::chat::{ChatMessage, ChatSession, MessageId, Role};
use talentbridge_core::config::schema::{ApiConfig, AuthConfig};

/// Response envelope shared by every JSON endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse<T> {
    #[serde(default)]
    #[allow(dead_code)]
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSession {
    session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    question: &'a str,
    session_id: &'a str,
}

/// Message as stored by the backend
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatMessageDto {
    id: i64,
    role: Role,
    content: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    created_by: Option<String>,
}

impl From<ChatMessageDto> for ChatMessage {
    fn from(dto: ChatMessageDto) -> Self {
        Self {
            id: MessageId::Remote(dto.id),
            role: dto.role,
            content: dto.content,
            created_at: dto.created_at,
            created_by: dto.created_by.unwrap_or_default(),
        }
    }
}

/// Accept RFC 3339 timestamps and offset-less ones, which are taken as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(serde::de::Error::custom)
}

/// HTTP implementation of [`ChatApi`]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpChatApi {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, access_token: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let access_token = access_token.filter(|token| !token.trim().is_empty());

        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            access_token,
        }
    }

    /// Create a client from the loaded configuration
    pub fn from_config(api: &ApiConfig, auth: &AuthConfig) -> Self {
        Self::new(
            api.base_url.clone(),
            Some(auth.access_token.clone()),
            Duration::from_secs(api.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("bad base url {}: {}", self.base_url, e)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidRequest(format!("base url cannot have a path: {}", self.base_url)))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn apply_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Turn a non-success response into an [`ApiError`], keeping the server's message
    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
            .ok()
            .and_then(|envelope| envelope.message);
        warn!("Chat API returned HTTP {}: {}", status, text);
        ApiError::api(status, message)
    }

    async fn read_data<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let envelope: ApiResponse<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("response envelope has no data".to_string()))
    }
}

/// Extract the reply from a send response
///
/// The endpoint answers with plain text, a JSON string, or an envelope
/// whose `data` is the reply.
fn parse_reply(body: &str) -> String {
    if let Ok(ApiResponse {
        data: Some(reply), ..
    }) = serde_json::from_str::<ApiResponse<String>>(body)
    {
        return reply;
    }
    if let Ok(reply) = serde_json::from_str::<String>(body) {
        return reply;
    }
    body.to_string()
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn list_sessions(&self) -> ApiResult<Vec<ChatSession>> {
        let url = self.endpoint(&["chat", "sessions"])?;
        debug!("Listing chat sessions: GET {}", url);
        let response = self.apply_headers(self.client.get(url)).send().await?;
        Self::read_data(response).await
    }

    async fn create_session(&self) -> ApiResult<String> {
        let url = self.endpoint(&["chat", "sessions"])?;
        debug!("Creating chat session: POST {}", url);
        let response = self.apply_headers(self.client.post(url)).send().await?;
        let created: CreatedSession = Self::read_data(response).await?;
        Ok(created.session_id)
    }

    async fn get_history(&self, session_id: &str) -> ApiResult<Vec<ChatMessage>> {
        let url = self.endpoint(&["chat", "sessions", session_id, "messages"])?;
        debug!("Loading history: GET {}", url);
        let response = self.apply_headers(self.client.get(url)).send().await?;
        let messages: Vec<ChatMessageDto> = Self::read_data(response).await?;
        Ok(messages.into_iter().map(ChatMessage::from).collect())
    }

    async fn send_message(&self, session_id: &str, question: &str) -> ApiResult<String> {
        let url = self.endpoint(&["chat-message"])?;
        debug!(
            "Sending message to session {} ({} chars)",
            session_id,
            question.chars().count()
        );
        let body = SendMessageRequest {
            question,
            session_id,
        };
        let response = self
            .apply_headers(self.client.post(url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let text = response.text().await?;
        Ok(parse_reply(&text))
    }

    async fn clear_session(&self, session_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["chat", "sessions", session_id])?;
        debug!("Deleting chat session: DELETE {}", url);
        let response = self.apply_headers(self.client.delete(url)).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}
