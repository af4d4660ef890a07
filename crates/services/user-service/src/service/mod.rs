//! Business logic layer.

mod auth_service;
mod token;
mod user_service;

pub use auth_service::{AuthService, AuthSync};
pub use user_service::{ConfirmationLinks, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;

#[cfg(test)]
mod tests;
