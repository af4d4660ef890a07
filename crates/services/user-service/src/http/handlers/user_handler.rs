//! Profile self-service handlers.

use axum::{
    extract::{Extension, State},
    routing::{get, patch},
    Router,
};

use common::AppResult;
use domain::{
    ChangeEmailRequest, ChangePasswordRequest, DeleteAccountRequest, ProfileResponse,
    MSG_SUCCESS_DELETE_USER, MSG_SUCCESS_GET_PROFILE, MSG_SUCCESS_UPDATE_EMAIL,
    MSG_SUCCESS_UPDATE_PASSWORD, MSG_SUCCESS_UPDATE_PROFILE,
};

use crate::http::extractors::{ProfileForm, ProfileFormDoc, ValidatedJson};
use crate::http::middleware::CurrentUser;
use crate::http::response::ApiResponse;
use crate::http::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_profile).patch(update_profile).delete(delete_account),
        )
        .route("/email", patch(change_email))
        .route("/password", patch(change_password))
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/user",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile in the standard envelope", body = ProfileResponse),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state.user_service.get_profile(current_user.id).await?;
    Ok(ApiResponse::ok(MSG_SUCCESS_GET_PROFILE, profile))
}

/// Update name, 2FA flag and optionally the profile image
#[utoipa::path(
    patch,
    path = "/api/v1/user",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body(content = ProfileFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Wrong extension, size exceeded or invalid input"),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ProfileForm(req): ProfileForm,
) -> AppResult<ApiResponse<()>> {
    state
        .user_service
        .update_profile(current_user.id, req)
        .await?;
    Ok(ApiResponse::message(MSG_SUCCESS_UPDATE_PROFILE))
}

/// Start an email change; a confirmation link is mailed to the new address
#[utoipa::path(
    patch,
    path = "/api/v1/user/email",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = ChangeEmailRequest,
    responses(
        (status = 200, description = "Confirmation sent"),
        (status = 400, description = "Invalid email"),
        (status = 401, description = "Invalid token")
    )
)]
pub async fn change_email(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChangeEmailRequest>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.change_email(current_user.id, req).await?;
    Ok(ApiResponse::message(MSG_SUCCESS_UPDATE_EMAIL))
}

/// Rotate the password
#[utoipa::path(
    patch,
    path = "/api/v1/user/password",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Confirmation mismatch or invalid input"),
        (status = 401, description = "Invalid token or wrong password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .user_service
        .change_password(current_user.id, req)
        .await?;
    Ok(ApiResponse::message(MSG_SUCCESS_UPDATE_PASSWORD))
}

/// Permanently delete the account
#[utoipa::path(
    delete,
    path = "/api/v1/user",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Invalid token or wrong password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DeleteAccountRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .user_service
        .delete_account(current_user.id, req)
        .await?;
    Ok(ApiResponse::message(MSG_SUCCESS_DELETE_USER))
}
