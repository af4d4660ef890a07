//! Clients for external services.

mod file_client;

pub use file_client::{FileClient, ImageStore};

#[cfg(any(test, feature = "test-utils"))]
pub use file_client::MockImageStore;
