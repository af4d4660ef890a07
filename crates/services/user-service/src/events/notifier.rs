//! Best-effort user lifecycle events for the rest of the mesh.

use std::sync::Arc;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::Serialize;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::UserSnapshot;

/// A committed change to a user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    Created(UserSnapshot),
    Updated(UserSnapshot),
    Deleted(Uuid),
}

impl UserEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UserEvent::Created(_) => "user.created",
            UserEvent::Updated(_) => "user.updated",
            UserEvent::Deleted(_) => "user.deleted",
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            UserEvent::Created(user) | UserEvent::Updated(user) => user.id,
            UserEvent::Deleted(id) => *id,
        }
    }
}

/// Sink for lifecycle events. Delivery is not guaranteed.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn notify(&self, event: UserEvent) -> AppResult<()>;
}

/// Send `event` on a detached task. Failures are logged, never returned.
pub fn spawn_notification(notifier: Arc<dyn ChangeNotifier>, event: UserEvent) {
    tokio::spawn(async move {
        let name = event.name();
        let user_id = event.user_id();
        if let Err(e) = notifier.notify(event).await {
            tracing::warn!(event = name, %user_id, error = %e, "Failed to publish user event");
        }
    });
}

#[derive(Serialize)]
struct DeletedPayload {
    user_id: Uuid,
}

/// [`ChangeNotifier`] appending to the event-bus Redis stream.
pub struct RedisEventBus {
    connection: ConnectionManager,
    stream: String,
    source: String,
}

impl RedisEventBus {
    pub fn new(
        connection: ConnectionManager,
        stream: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            connection,
            stream: stream.into(),
            source: source.into(),
        }
    }
}

#[async_trait]
impl ChangeNotifier for RedisEventBus {
    async fn notify(&self, event: UserEvent) -> AppResult<()> {
        let payload = match &event {
            UserEvent::Created(user) | UserEvent::Updated(user) => serde_json::to_string(user),
            UserEvent::Deleted(id) => serde_json::to_string(&DeletedPayload { user_id: *id }),
        }
        .map_err(|e| AppError::internal(format!("Failed to encode event: {}", e)))?;

        let mut conn = self.connection.clone();
        let fields = [
            ("event", event.name()),
            ("source", self.source.as_str()),
            ("payload", payload.as_str()),
        ];
        let _: String = conn.xadd(&self.stream, "*", &fields).await?;

        tracing::debug!(event = event.name(), user_id = %event.user_id(), "Published user event");
        Ok(())
    }
}
