//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::http::extractors::ProfileFormDoc;
use domain::{ChangeEmailRequest, ChangePasswordRequest, DeleteAccountRequest, ProfileResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::http::handlers::health_handler::health_check,
        crate::http::handlers::user_handler::get_profile,
        crate::http::handlers::user_handler::update_profile,
        crate::http::handlers::user_handler::change_email,
        crate::http::handlers::user_handler::change_password,
        crate::http::handlers::user_handler::delete_account,
    ),
    components(
        schemas(
            ProfileResponse,
            ProfileFormDoc,
            ChangeEmailRequest,
            ChangePasswordRequest,
            DeleteAccountRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "User", description = "Profile self-service"),
        (name = "Health", description = "Liveness of backing services"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
