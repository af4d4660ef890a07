//! Auth service - record changes pushed by the auth domain.
//!
//! The auth domain owns sign-up and verification; it mirrors those changes
//! here and this service re-broadcasts them to the rest of the mesh.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use common::AppResult;
use domain::{User, UserSnapshot};

use crate::events::{spawn_notification, ChangeNotifier, UserEvent};
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn create_user(&self, user: User) -> AppResult<Uuid>;

    /// Full-row overwrite of an existing user
    async fn update_user(&self, user: User) -> AppResult<()>;

    async fn delete_user(&self, user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AuthService.
pub struct AuthSync {
    repo: Arc<dyn UserRepository>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl AuthSync {
    pub fn new(repo: Arc<dyn UserRepository>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self { repo, notifier }
    }
}

#[async_trait]
impl AuthService for AuthSync {
    async fn create_user(&self, user: User) -> AppResult<Uuid> {
        let id = self.repo.insert(&user).await?;
        info!(user_id = %id, "User created by auth domain");
        spawn_notification(
            Arc::clone(&self.notifier),
            UserEvent::Created(UserSnapshot::from(&user)),
        );
        Ok(id)
    }

    async fn update_user(&self, user: User) -> AppResult<()> {
        self.repo.update(&user).await?;
        info!(user_id = %user.id, "User updated by auth domain");
        spawn_notification(
            Arc::clone(&self.notifier),
            UserEvent::Updated(UserSnapshot::from(&user)),
        );
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        self.repo.delete(user_id).await?;
        info!(%user_id, "User deleted by auth domain");
        spawn_notification(Arc::clone(&self.notifier), UserEvent::Deleted(user_id));
        Ok(())
    }
}
