//! User service - profile reads and the self-service mutation sagas.
//!
//! Each mutation coordinates the user store with the image store, the
//! pending-state cache and the notification publisher. None of these share a
//! transaction: ordering and best-effort compensation keep them consistent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    change_email_token_key, is_allowed_image_extension, new_email_key, ChangeEmailRequest,
    ChangePasswordRequest, DeleteAccountRequest, ImageUpload, Password, ProfileResponse,
    UpdateProfileRequest, User, UserSnapshot, CHANGE_EMAIL_TTL, MAX_UPLOAD_SIZE,
    MSG_CONVERT_IMAGE, MSG_PASSWORD_MISMATCH, MSG_PUBLISH_MESSAGE, MSG_SIZE_EXCEEDED,
    MSG_TYPE_CHANGE_EMAIL, MSG_USER_NOT_FOUND, MSG_WRONG_EXTENSION, MSG_WRONG_PASSWORD,
};

use super::token::generate_token;
use crate::clients::ImageStore;
use crate::events::{
    spawn_notification, ChangeNotifier, MailNotificationMessage, MessagePublisher, UserEvent,
};
use crate::infra::PendingStore;
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<ProfileResponse>;

    /// Merge name and 2FA flag, optionally replacing the profile image.
    async fn update_profile(&self, user_id: Uuid, req: UpdateProfileRequest) -> AppResult<()>;

    /// Stage a new email and send a confirmation link to it.
    ///
    /// The user record is not touched; the swap happens on confirmation.
    async fn change_email(&self, user_id: Uuid, req: ChangeEmailRequest) -> AppResult<()>;

    async fn change_password(&self, user_id: Uuid, req: ChangePasswordRequest) -> AppResult<()>;

    /// Hard-delete the account after checking the current password.
    async fn delete_account(&self, user_id: Uuid, req: DeleteAccountRequest) -> AppResult<()>;
}

/// Where confirmation links point and which subject carries them.
#[derive(Debug, Clone)]
pub struct ConfirmationLinks {
    pub auth_url: String,
    pub verification_path: String,
    pub mail_subject: String,
}

impl ConfirmationLinks {
    pub fn change_email_link(&self, user_id: Uuid, token: &str) -> String {
        format!(
            "{}/{}userid={}&changeEmailToken={}",
            self.auth_url, self.verification_path, user_id, token
        )
    }

    pub fn subject_for(&self, user_id: Uuid) -> String {
        format!("{}.{}", self.mail_subject, user_id)
    }
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    images: Arc<dyn ImageStore>,
    pending: Arc<dyn PendingStore>,
    publisher: Arc<dyn MessagePublisher>,
    notifier: Arc<dyn ChangeNotifier>,
    links: ConfirmationLinks,
}

impl UserManager {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        images: Arc<dyn ImageStore>,
        pending: Arc<dyn PendingStore>,
        publisher: Arc<dyn MessagePublisher>,
        notifier: Arc<dyn ChangeNotifier>,
        links: ConfirmationLinks,
    ) -> Self {
        Self {
            repo,
            images,
            pending,
            publisher,
            notifier,
            links,
        }
    }

    async fn load(&self, user_id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(MSG_USER_NOT_FOUND)
            .inspect_err(|_| warn!(%user_id, "User not found"))
    }

    fn check_password(user: &User, plain: &str) -> AppResult<()> {
        if user.password().verify(plain) {
            Ok(())
        } else {
            warn!(user_id = %user.id, "Wrong password");
            Err(AppError::unauthorized(MSG_WRONG_PASSWORD))
        }
    }

    /// Validate and store a new image, returning its reference.
    async fn upload_image(&self, user_id: Uuid, image: ImageUpload) -> AppResult<String> {
        let ext = image.extension();
        if !is_allowed_image_extension(&ext) {
            warn!(%user_id, ext = %ext, "Rejected image extension");
            return Err(AppError::bad_request(MSG_WRONG_EXTENSION));
        }
        if image.size > MAX_UPLOAD_SIZE {
            warn!(%user_id, size = image.size, "Rejected oversized image");
            return Err(AppError::bad_request(MSG_SIZE_EXCEEDED));
        }

        let bytes = image.into_bytes().map_err(|e| {
            error!(%user_id, error = %e, "Failed to read image bytes");
            AppError::internal(MSG_CONVERT_IMAGE)
        })?;

        // The file service's own error goes back to the caller untouched.
        self.images.save(bytes, &ext).await.inspect_err(|e| {
            error!(%user_id, error = %e, "Failed to upload image to file service");
        })
    }

    /// Remove an image without letting the outcome reach the caller.
    async fn discard_image(&self, user_id: Uuid, name: &str) {
        if let Err(e) = self.images.remove(name).await {
            error!(%user_id, image = name, error = %e, "Failed to remove image via file service");
        }
    }

    fn notify(&self, event: UserEvent) {
        spawn_notification(Arc::clone(&self.notifier), event);
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<ProfileResponse> {
        self.load(user_id).await.map(ProfileResponse::from)
    }

    async fn update_profile(&self, user_id: Uuid, req: UpdateProfileRequest) -> AppResult<()> {
        let current = self.load(user_id).await?;

        let mut updated = current.clone();
        updated.merge_profile(&req.full_name, req.two_factor_enabled);

        // An upload without a file name is treated as no upload
        let image = req.image.filter(|image| !image.file_name.is_empty());
        let uploaded = match image {
            Some(image) => {
                let name = self.upload_image(user_id, image).await?;
                updated.image = Some(name.clone());
                Some(name)
            }
            None => None,
        };

        if let Err(e) = self.repo.update(&updated).await {
            error!(%user_id, error = %e, "Update user failed");
            if let Some(name) = uploaded.as_deref() {
                self.discard_image(user_id, name).await;
            }
            return Err(e);
        }

        if uploaded.is_some() {
            if let Some(old) = current.image.as_deref() {
                self.discard_image(user_id, old).await;
            }
        }

        info!(%user_id, image_replaced = uploaded.is_some(), "Profile updated");
        self.notify(UserEvent::Updated(UserSnapshot::from(&updated)));
        Ok(())
    }

    async fn change_email(&self, user_id: Uuid, req: ChangeEmailRequest) -> AppResult<()> {
        let token = generate_token()?;

        self.pending
            .set(&new_email_key(user_id), &req.email, CHANGE_EMAIL_TTL)
            .await?;
        self.pending
            .set(&change_email_token_key(user_id), &token, CHANGE_EMAIL_TTL)
            .await?;

        let link = self.links.change_email_link(user_id, &token);
        let payload =
            MailNotificationMessage::new(req.email, MSG_TYPE_CHANGE_EMAIL, link).to_payload()?;

        self.publisher
            .publish(&self.links.subject_for(user_id), payload)
            .await
            .map_err(|e| {
                error!(%user_id, error = %e, "Failed to publish change email notification");
                AppError::internal(MSG_PUBLISH_MESSAGE)
            })?;

        info!(%user_id, "Change email confirmation sent");
        Ok(())
    }

    async fn change_password(&self, user_id: Uuid, req: ChangePasswordRequest) -> AppResult<()> {
        if req.new_password != req.confirm_new_password {
            warn!(%user_id, "New password confirmation mismatch");
            return Err(AppError::bad_request(MSG_PASSWORD_MISMATCH));
        }

        let mut user = self.load(user_id).await?;
        Self::check_password(&user, &req.password)?;

        user.password = Password::new(&req.new_password)
            .inspect_err(|e| error!(%user_id, error = %e, "Hash password error"))?
            .into_string();

        self.repo.update(&user).await?;

        info!(%user_id, "Password changed");
        self.notify(UserEvent::Updated(UserSnapshot::from(&user)));
        Ok(())
    }

    async fn delete_account(&self, user_id: Uuid, req: DeleteAccountRequest) -> AppResult<()> {
        let user = self.load(user_id).await?;
        Self::check_password(&user, &req.password)?;

        // The profile image stays in the file service.
        self.repo.delete(user_id).await?;

        info!(%user_id, "Account deleted");
        self.notify(UserEvent::Deleted(user_id));
        Ok(())
    }
}
