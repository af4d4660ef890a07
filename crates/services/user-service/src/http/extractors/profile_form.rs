//! Multipart extractor for profile updates.

use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request,
    },
    http::StatusCode,
};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{ImageUpload, UpdateProfileRequest, MAX_UPLOAD_SIZE, MSG_SIZE_EXCEEDED};

use super::validated_json::validation_error;

/// Profile update read from `multipart/form-data`.
///
/// Fields: `full_name`, `two_factor_enabled` and an optional `image` file.
/// Image bytes past the upload limit are counted but not buffered.
pub struct ProfileForm(pub UpdateProfileRequest);

/// Multipart body of the profile update, for the API docs
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProfileFormDoc {
    #[schema(example = "Jane Doe")]
    full_name: String,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
    two_factor_enabled: bool,
}

#[async_trait]
impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let mut full_name = None;
        let mut two_factor_enabled = false;
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("full_name") => full_name = Some(field.text().await.map_err(malformed)?),
                Some("two_factor_enabled") => {
                    two_factor_enabled = parse_flag(&field.text().await.map_err(malformed)?)?
                }
                Some("image") => image = Some(read_image(field).await?),
                _ => {}
            }
        }

        let request = UpdateProfileRequest {
            full_name: full_name
                .ok_or_else(|| AppError::validation("full_name is required"))?,
            image,
            two_factor_enabled,
        };
        request.validate().map_err(validation_error)?;

        Ok(ProfileForm(request))
    }
}

async fn read_image(mut field: Field<'_>) -> AppResult<ImageUpload> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let mut size = 0u64;
    let mut content = Vec::new();

    while let Some(chunk) = field.chunk().await.map_err(malformed)? {
        size += chunk.len() as u64;
        if size <= MAX_UPLOAD_SIZE {
            content.extend_from_slice(&chunk);
        }
    }

    Ok(ImageUpload::new(file_name, size, content))
}

fn parse_flag(value: &str) -> AppResult<bool> {
    match value.trim() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" | "" => Ok(false),
        other => Err(AppError::validation(format!(
            "two_factor_enabled must be a boolean, got {other:?}"
        ))),
    }
}

/// A body cut off by the request limit reports the same message as an
/// oversized image.
fn malformed(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::bad_request(MSG_SIZE_EXCEEDED);
    }
    AppError::validation(err.body_text())
}
