//! Backend wire types and the client trait the widget depends on.
//!
//! The backend exposes two endpoints:
//!
//! - `GET /health` returns a [`HealthReport`]
//! - `POST /chat` takes a [`ChatRequest`] and returns a [`ChatReply`]
//!
//! [`HttpBackend`] talks to a real server; tests substitute their own
//! [`ChatBackend`] implementations.

pub mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::widget::contact::ContactInfo;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<ContactInfo>,
}

/// The reply's `status` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Success,
    UserInfoRequired,
    /// Anything else, including a missing field.
    #[default]
    #[serde(other)]
    Other,
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChatReply {
    #[serde(default)]
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A decoded chat response together with its HTTP status line.
///
/// The HTTP status and the body `status` jointly decide how the widget
/// renders the reply, so both are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub http_status: u16,
    /// Canonical reason phrase, e.g. `Internal Server Error`.
    pub reason: String,
    pub reply: ChatReply,
}

impl ChatExchange {
    /// A `200 OK` exchange, mostly for fakes.
    pub fn ok(reply: ChatReply) -> Self {
        Self {
            http_status: 200,
            reason: "OK".to_string(),
            reply,
        }
    }

    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.http_status)
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_components: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_configured: Option<bool>,
}

/// Network client seam for the widget.
///
/// Implementations report transport and decode failures as errors and
/// everything the server actually said, including non-2xx replies with a
/// JSON body, as a successful [`ChatExchange`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Probe backend readiness.
    async fn health(&self) -> Result<HealthReport>;

    /// Send one question.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatExchange>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_missing_user_info() {
        let request = ChatRequest {
            question: "Hi".to_string(),
            user_info: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"question": "Hi"}));
    }

    #[test]
    fn test_request_carries_user_info() {
        let request = ChatRequest {
            question: "When can we meet?".to_string(),
            user_info: Some(ContactInfo {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                company: String::new(),
                role: String::new(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "question": "When can we meet?",
                "user_info": {"name": "Ann", "email": "ann@example.com", "company": "", "role": ""}
            })
        );
    }

    #[test]
    fn test_reply_status_parsing() {
        let reply: ChatReply =
            serde_json::from_value(json!({"status": "user_info_required", "answer": "Name?"}))
                .unwrap();
        assert_eq!(reply.status, ReplyStatus::UserInfoRequired);

        let reply: ChatReply = serde_json::from_value(json!({"status": "queued"})).unwrap();
        assert_eq!(reply.status, ReplyStatus::Other);

        let reply: ChatReply =
            serde_json::from_value(json!({"error": "Question is required"})).unwrap();
        assert_eq!(reply.status, ReplyStatus::Other);
        assert_eq!(reply.error.as_deref(), Some("Question is required"));
    }

    #[test]
    fn test_health_report_partial_body() {
        let report: HealthReport = serde_json::from_value(json!({"status": "healthy"})).unwrap();
        assert_eq!(report.status, "healthy");
        assert!(report.ai_components.is_none());
    }
}
