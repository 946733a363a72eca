//! OpenAI chat completion wire types.

use serde::{Deserialize, Serialize};

use warmer_protocols::{ChatMessage, ChatRequest, ModelParams};

/// Request body.
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ApiRequest {
    pub fn new(request: ChatRequest, params: &ModelParams) -> Self {
        Self {
            model: params.model.clone(),
            messages: request.messages.into_iter().map(ApiMessage::from).collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<ChatMessage> for ApiMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content,
        }
    }
}

/// Successful response body. Only the fields the client reads.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

impl ApiResponse {
    /// Content of the first choice, if any.
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Error response body: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

/// Best-effort human message from an error body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
