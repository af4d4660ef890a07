//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use std::time::Duration;

// =============================================================================
// Profile image
// =============================================================================

/// Maximum accepted profile image upload (6 MiB)
pub const MAX_UPLOAD_SIZE: u64 = 6 * 1024 * 1024;

/// Image extensions accepted by the file service
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Check if an image extension is accepted.
///
/// Expects the lowercased extension, see `ImageUpload::extension`.
pub fn is_allowed_image_extension(ext: &str) -> bool {
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext)
}

// =============================================================================
// Email change confirmation
// =============================================================================

/// Lifetime of a staged email change
pub const CHANGE_EMAIL_TTL: Duration = Duration::from_secs(30 * 60);

/// Cache key prefix for the candidate email
pub const CACHE_PREFIX_NEW_EMAIL: &str = "newEmail:";

/// Cache key prefix for the one-time confirmation token
pub const CACHE_PREFIX_CHANGE_EMAIL_TOKEN: &str = "changeEmailToken:";

/// Random bytes in a confirmation token (hex encoded to 64 chars)
pub const CHANGE_EMAIL_TOKEN_BYTES: usize = 32;

/// Message type understood by the notification service
pub const MSG_TYPE_CHANGE_EMAIL: &str = "changeEmail";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum full name length
pub const MAX_NAME_LENGTH: usize = 100;

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_USER_NOT_FOUND: &str = "user not found";
pub const MSG_WRONG_PASSWORD: &str = "wrong password";
pub const MSG_INVALID_TOKEN: &str = "invalid token";
pub const MSG_WRONG_EXTENSION: &str = "error file extension, support jpg, jpeg, and png";
pub const MSG_SIZE_EXCEEDED: &str = "max size exceeded: 6mb";
pub const MSG_PASSWORD_MISMATCH: &str = "password doesn't match";
pub const MSG_CONVERT_IMAGE: &str = "error processing image";
pub const MSG_GENERATE_TOKEN: &str = "error generate verification token";
pub const MSG_SET_RESOURCE: &str = "failed save resource";
pub const MSG_PUBLISH_MESSAGE: &str = "error publish email";

pub const MSG_SUCCESS_GET_PROFILE: &str = "success get profile data";
pub const MSG_SUCCESS_UPDATE_PROFILE: &str = "success update profile data";
pub const MSG_SUCCESS_UPDATE_EMAIL: &str = "verify to change email";
pub const MSG_SUCCESS_UPDATE_PASSWORD: &str = "success update password";
pub const MSG_SUCCESS_DELETE_USER: &str = "success delete user";

/// Build the cache key holding a user's candidate email
pub fn new_email_key(user_id: impl std::fmt::Display) -> String {
    format!("{}{}", CACHE_PREFIX_NEW_EMAIL, user_id)
}

/// Build the cache key holding a user's confirmation token
pub fn change_email_token_key(user_id: impl std::fmt::Display) -> String {
    format!("{}{}", CACHE_PREFIX_CHANGE_EMAIL_TOKEN, user_id)
}
