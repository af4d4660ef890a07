//! Outbound messaging: mail notifications and user lifecycle events.
//!
//! Both travel over Redis streams. Mail requests are acknowledged (the
//! caller waits for the entry id); lifecycle events are fire-and-forget.

mod notifier;
mod publisher;

pub use notifier::{spawn_notification, ChangeNotifier, RedisEventBus, UserEvent};
pub use publisher::{MailNotificationMessage, MessagePublisher, RedisStreamPublisher};

#[cfg(any(test, feature = "test-utils"))]
pub use publisher::MockMessagePublisher;
