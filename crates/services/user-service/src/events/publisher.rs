//! Acknowledged publisher for notification-service requests.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Mail request consumed by the notification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailNotificationMessage {
    pub receiver: Vec<String>,
    pub msg_type: String,
    pub message: String,
}

impl MailNotificationMessage {
    pub fn new(receiver: impl Into<String>, msg_type: &str, message: impl Into<String>) -> Self {
        Self {
            receiver: vec![receiver.into()],
            msg_type: msg_type.to_string(),
            message: message.into(),
        }
    }

    pub fn to_payload(&self) -> AppResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| AppError::internal(format!("Failed to encode mail message: {}", e)))
    }
}

/// Publishes a payload under a subject and waits for the broker acknowledgement.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Returns the broker-assigned id of the stored message.
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> AppResult<String>;
}

/// [`MessagePublisher`] appending to a Redis stream.
pub struct RedisStreamPublisher {
    connection: ConnectionManager,
    stream: String,
}

impl RedisStreamPublisher {
    pub fn new(connection: ConnectionManager, stream: impl Into<String>) -> Self {
        Self {
            connection,
            stream: stream.into(),
        }
    }
}

#[async_trait]
impl MessagePublisher for RedisStreamPublisher {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> AppResult<String> {
        let mut conn = self.connection.clone();
        let fields: [(&str, &[u8]); 2] = [("subject", subject.as_bytes()), ("payload", &payload)];

        let id: String = conn.xadd(&self.stream, "*", &fields).await?;
        tracing::debug!(stream = %self.stream, subject, id = %id, "Published message");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_message_wire_format() {
        let message =
            MailNotificationMessage::new("new@example.com", "changeEmail", "http://link");
        let json: serde_json::Value =
            serde_json::from_slice(&message.to_payload().unwrap()).unwrap();

        assert_eq!(json["receiver"], serde_json::json!(["new@example.com"]));
        assert_eq!(json["msg_type"], "changeEmail");
        assert_eq!(json["message"], "http://link");
    }
}
