//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The user-service and its transports share these types.

pub mod constants;
pub mod error;
pub mod password;
pub mod request;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use request::{
    ChangeEmailRequest, ChangePasswordRequest, DeleteAccountRequest, ImageUpload,
    UpdateProfileRequest,
};
pub use user::{ProfileResponse, User, UserSnapshot};
