//! Route configuration.

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::CorsConfig;

use crate::http::cors::cors_layer;
use crate::http::handlers::{health_routes, user_routes};
use crate::http::middleware::auth_middleware;
use crate::http::openapi::ApiDoc;
use crate::http::state::AppState;

/// Request body cap for user routes; above the image limit so oversized
/// uploads reach the size check instead of being cut off by the transport.
pub const USER_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api/v1/user",
            user_routes()
                .layer(DefaultBodyLimit::max(USER_BODY_LIMIT))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
