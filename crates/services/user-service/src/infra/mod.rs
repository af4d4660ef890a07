//! Infrastructure layer - database, cache and outbound transports.

mod cache;
mod db;
pub mod migrations;

pub use cache::{PendingStore, RedisCache};
pub use db::Database;
pub use migrations::Migrator;

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockPendingStore;
