//! Mutation requests accepted by the user-service.
//!
//! These are request-scoped values; none of them is persisted as-is.

use serde::Deserialize;
use validator::Validate;

use crate::error::{DomainError, DomainResult};

/// Profile image received from the caller.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, used only for its extension
    pub file_name: String,
    /// Size reported by the transport, in bytes
    pub size: u64,
    /// Buffered content; may be shorter than `size` if the body was cut off
    pub content: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, size: u64, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            content,
        }
    }

    /// Lowercased extension after the last dot, or an empty string.
    pub fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => String::new(),
        }
    }

    /// Take the raw bytes, failing if the buffered content is incomplete.
    pub fn into_bytes(self) -> DomainResult<Vec<u8>> {
        if self.content.len() as u64 != self.size {
            return Err(DomainError::internal(format!(
                "image content is {} bytes, expected {}",
                self.content.len(),
                self.size
            )));
        }
        Ok(self.content)
    }
}

/// Profile update: name, two-factor flag and an optional new image.
#[derive(Debug, Clone, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "full_name must be 1 to 100 characters"))]
    pub full_name: String,
    pub image: Option<ImageUpload>,
    pub two_factor_enabled: bool,
}

/// Email change initiation
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangeEmailRequest {
    #[validate(email(message = "invalid email"))]
    #[cfg_attr(feature = "openapi", schema(example = "john.doe@example.com"))]
    pub email: String,
}

/// Password rotation
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangePasswordRequest {
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 6, message = "new_password must be at least 6 characters"))]
    pub new_password: String,
    #[validate(length(
        min = 6,
        message = "confirm_new_password must be at least 6 characters"
    ))]
    pub confirm_new_password: String,
}

/// Account deletion, confirmed with the current password
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteAccountRequest {
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}
