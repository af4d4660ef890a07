//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password::Password;

/// User profile record.
///
/// `id` is assigned by the auth domain and never changes; `password` always
/// holds an Argon2 hash. `image` is an opaque file-service reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub image: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub verified: bool,
    pub two_factor_enabled: bool,
}

impl User {
    /// Stored password hash as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password.as_str())
    }

    /// Merge a profile update into this record.
    ///
    /// The name is trimmed first; each field is only touched when it differs.
    pub fn merge_profile(&mut self, full_name: &str, two_factor_enabled: bool) {
        let trimmed = full_name.trim();
        if trimmed != self.full_name {
            self.full_name = trimmed.to_string();
        }
        if two_factor_enabled != self.two_factor_enabled {
            self.two_factor_enabled = two_factor_enabled;
        }
    }
}

/// Full user state published on the event bus.
///
/// Unlike [`User`], the password hash is serialized: downstream services
/// (the auth domain) keep their own copy of credentials in sync from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: Uuid,
    pub full_name: String,
    pub image: Option<String>,
    pub email: String,
    pub password: String,
    pub verified: bool,
    pub two_factor_enabled: bool,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            image: user.image.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            verified: user.verified,
            two_factor_enabled: user.two_factor_enabled,
        }
    }
}

/// Profile returned to the owner (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileResponse {
    /// Display name
    pub full_name: String,
    /// File-service image reference
    pub image: Option<String>,
    /// Email address
    pub email: String,
    /// Whether the email is verified
    pub verified: bool,
    /// Whether two-factor authentication is on
    pub two_factor_enabled: bool,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name,
            image: user.image,
            email: user.email,
            verified: user.verified,
            two_factor_enabled: user.two_factor_enabled,
        }
    }
}
