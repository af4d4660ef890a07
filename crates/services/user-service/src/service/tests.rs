use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use mockall::Sequence;
use tokio::sync::mpsc;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use common::{AppError, AppResult, ErrorKind};
use domain::{
    ChangeEmailRequest, ChangePasswordRequest, DeleteAccountRequest, ImageUpload, Password,
    UpdateProfileRequest, User, CHANGE_EMAIL_TTL, MAX_UPLOAD_SIZE, MSG_CONVERT_IMAGE,
    MSG_PASSWORD_MISMATCH, MSG_PUBLISH_MESSAGE, MSG_SET_RESOURCE, MSG_SIZE_EXCEEDED,
    MSG_USER_NOT_FOUND, MSG_WRONG_EXTENSION, MSG_WRONG_PASSWORD,
};

use super::{AuthService, AuthSync, ConfirmationLinks, UserManager, UserService};
use crate::clients::MockImageStore;
use crate::events::{ChangeNotifier, MailNotificationMessage, MockMessagePublisher, UserEvent};
use crate::infra::MockPendingStore;
use crate::repository::MockUserRepository;

const PASSWORD: &str = "secret123";

fn password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| Password::new(PASSWORD).unwrap().into_string())
        .clone()
}

fn user(id: Uuid, image: Option<&str>) -> User {
    User {
        id,
        full_name: "John Doe".to_string(),
        image: image.map(str::to_string),
        email: "john@example.com".to_string(),
        password: password_hash(),
        verified: true,
        two_factor_enabled: false,
    }
}

fn png(size: usize) -> ImageUpload {
    ImageUpload::new("avatar.png", size as u64, vec![7u8; size])
}

struct RecordingNotifier(mpsc::UnboundedSender<UserEvent>);

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn notify(&self, event: UserEvent) -> AppResult<()> {
        let _ = self.0.send(event);
        Ok(())
    }
}

struct Harness {
    repo: MockUserRepository,
    images: MockImageStore,
    pending: MockPendingStore,
    publisher: MockMessagePublisher,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: MockUserRepository::new(),
            images: MockImageStore::new(),
            pending: MockPendingStore::new(),
            publisher: MockMessagePublisher::new(),
        }
    }

    fn with_user(mut self, user: User) -> Self {
        let id = user.id;
        self.repo
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .returning(move |_| Ok(Some(user.clone())));
        self
    }

    fn build(self) -> (UserManager, mpsc::UnboundedReceiver<UserEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = UserManager::new(
            Arc::new(self.repo),
            Arc::new(self.images),
            Arc::new(self.pending),
            Arc::new(self.publisher),
            Arc::new(RecordingNotifier(tx)),
            ConfirmationLinks {
                auth_url: "http://auth.local".to_string(),
                verification_path: "verify-change-email?".to_string(),
                mail_subject: "notification.mail".to_string(),
            },
        );
        (manager, rx)
    }
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<UserEvent>) -> UserEvent {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("notification was not sent")
        .expect("notifier dropped")
}

async fn assert_no_event(rx: &mut mpsc::UnboundedReceiver<UserEvent>) {
    let received = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(
        !matches!(received, Ok(Some(_))),
        "unexpected notification: {received:?}"
    );
}

// =============================================================================
// Get Profile
// =============================================================================

#[tokio::test]
async fn test_get_profile() {
    let id = Uuid::new_v4();
    let (service, _rx) = Harness::new().with_user(user(id, Some("me.png"))).build();

    let profile = service.get_profile(id).await.unwrap();

    assert_eq!(profile.full_name, "John Doe");
    assert_eq!(profile.image.as_deref(), Some("me.png"));
    assert_eq!(profile.email, "john@example.com");
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let mut harness = Harness::new();
    harness.repo.expect_find_by_id().returning(|_| Ok(None));
    let (service, _rx) = harness.build();

    let err = service.get_profile(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == MSG_USER_NOT_FOUND));
}

// =============================================================================
// Update Profile
// =============================================================================

#[tokio::test]
async fn test_update_without_image_merges_fields_only() {
    let id = Uuid::new_v4();
    let original = user(id, Some("old.png"));
    let mut harness = Harness::new().with_user(original.clone());

    let expected = User {
        full_name: "Jane Doe".to_string(),
        two_factor_enabled: true,
        ..original
    };
    let stored = expected.clone();
    harness
        .repo
        .expect_update()
        .withf(move |row| *row == stored)
        .times(1)
        .returning(|_| Ok(()));
    // No expectations on the image store: any call fails the test.
    let (service, mut rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "  Jane Doe ".to_string(),
        image: None,
        two_factor_enabled: true,
    };
    assert_ok!(service.update_profile(id, req).await);

    match next_event(&mut rx).await {
        UserEvent::Updated(snapshot) => {
            assert_eq!(snapshot.full_name, expected.full_name);
            assert_eq!(snapshot.password, expected.password);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_update_with_image_replaces_old_after_commit() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("old.png")));
    let mut seq = Sequence::new();

    harness
        .images
        .expect_save()
        .withf(|bytes, ext| bytes.len() == 16 && ext == "png")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok("new.png".to_string()));
    harness
        .repo
        .expect_update()
        .withf(|row| row.image.as_deref() == Some("new.png"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    harness
        .images
        .expect_remove()
        .withf(|name| name == "old.png")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let (service, mut rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(png(16)),
        two_factor_enabled: false,
    };
    assert_ok!(service.update_profile(id, req).await);

    match next_event(&mut rx).await {
        UserEvent::Updated(snapshot) => assert_eq!(snapshot.image.as_deref(), Some("new.png")),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_update_first_image_has_nothing_to_remove() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness
        .images
        .expect_save()
        .times(1)
        .returning(|_, _| Ok("first.png".to_string()));
    harness.repo.expect_update().times(1).returning(|_| Ok(()));
    harness.images.expect_remove().never();
    let (service, _rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(png(8)),
        two_factor_enabled: false,
    };
    assert_ok!(service.update_profile(id, req).await);
}

#[tokio::test]
async fn test_update_commit_failure_rolls_back_new_image() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("old.png")));
    let mut seq = Sequence::new();

    harness
        .images
        .expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok("new.png".to_string()));
    harness
        .repo
        .expect_update()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(AppError::not_found(MSG_USER_NOT_FOUND)));
    harness
        .images
        .expect_remove()
        .withf(|name| name == "new.png")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let (service, mut rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(png(4)),
        two_factor_enabled: true,
    };
    let err = service.update_profile(id, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_no_event(&mut rx).await;
}

#[tokio::test]
async fn test_update_cleanup_failure_is_not_reported() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("old.png")));
    harness
        .images
        .expect_save()
        .returning(|_, _| Ok("new.png".to_string()));
    harness.repo.expect_update().returning(|_| Ok(()));
    harness
        .images
        .expect_remove()
        .times(1)
        .returning(|_| Err(AppError::service_unavailable("file-service")));
    let (service, mut rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(png(4)),
        two_factor_enabled: false,
    };
    assert_ok!(service.update_profile(id, req).await);
    assert!(matches!(next_event(&mut rx).await, UserEvent::Updated(_)));
}

#[tokio::test]
async fn test_update_rejects_webp_without_side_effects() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("old.png")));
    harness.repo.expect_update().never();
    let (service, mut rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(ImageUpload::new("avatar.webp", 4, vec![0; 4])),
        two_factor_enabled: false,
    };
    let err = service.update_profile(id, req).await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == MSG_WRONG_EXTENSION));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_no_event(&mut rx).await;
}

#[tokio::test]
async fn test_update_rejects_oversized_image() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness.repo.expect_update().never();
    let (service, _rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(ImageUpload::new("big.jpg", MAX_UPLOAD_SIZE + 1, Vec::new())),
        two_factor_enabled: false,
    };
    let err = service.update_profile(id, req).await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == MSG_SIZE_EXCEEDED));
}

#[tokio::test]
async fn test_update_accepts_image_at_size_limit() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness
        .images
        .expect_save()
        .withf(|bytes, ext| bytes.len() as u64 == MAX_UPLOAD_SIZE && ext == "png")
        .times(1)
        .returning(|_, _| Ok("limit.png".to_string()));
    harness
        .repo
        .expect_update()
        .withf(|u| u.image.as_deref() == Some("limit.png"))
        .times(1)
        .returning(|_| Ok(()));
    harness.images.expect_remove().never();
    let (service, mut rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(png(MAX_UPLOAD_SIZE as usize)),
        two_factor_enabled: false,
    };
    assert_ok!(service.update_profile(id, req).await);
    assert!(matches!(next_event(&mut rx).await, UserEvent::Updated(_)));
}

#[tokio::test]
async fn test_update_extension_match_ignores_case() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness
        .images
        .expect_save()
        .withf(|_, ext| ext == "png")
        .times(1)
        .returning(|_, _| Ok("upper.png".to_string()));
    harness.repo.expect_update().times(1).returning(|_| Ok(()));
    let (service, _rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(ImageUpload::new("AVATAR.PNG", 4, vec![0; 4])),
        two_factor_enabled: false,
    };
    assert_ok!(service.update_profile(id, req).await);
}

#[tokio::test]
async fn test_update_incomplete_image_is_conversion_error() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness.repo.expect_update().never();
    let (service, _rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(ImageUpload::new("me.jpeg", 10, vec![1, 2, 3])),
        two_factor_enabled: false,
    };
    let err = service.update_profile(id, req).await.unwrap_err();

    assert!(matches!(err, AppError::Internal(ref msg) if msg == MSG_CONVERT_IMAGE));
}

#[tokio::test]
async fn test_update_unknown_user_fails_before_image_handling() {
    let mut harness = Harness::new();
    harness.repo.expect_find_by_id().returning(|_| Ok(None));
    harness.repo.expect_update().never();
    let (service, _rx) = harness.build();

    // The webp upload would be rejected, but the lookup fails first.
    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(ImageUpload::new("avatar.webp", 4, vec![0; 4])),
        two_factor_enabled: false,
    };
    let err = service.update_profile(Uuid::new_v4(), req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_update_image_save_error_is_passed_through() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("old.png")));
    harness
        .images
        .expect_save()
        .returning(|_, _| Err(AppError::service_unavailable("file-service")));
    harness.repo.expect_update().never();
    let (service, _rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(png(4)),
        two_factor_enabled: false,
    };
    let err = service.update_profile(id, req).await.unwrap_err();

    // The file service's error is returned as-is, not rewrapped.
    assert!(matches!(err, AppError::ServiceUnavailable(ref svc) if svc == "file-service"));
}

#[tokio::test]
async fn test_update_empty_file_name_counts_as_no_image() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("old.png")));
    harness
        .repo
        .expect_update()
        .withf(|row| row.image.as_deref() == Some("old.png"))
        .times(1)
        .returning(|_| Ok(()));
    let (service, _rx) = harness.build();

    let req = UpdateProfileRequest {
        full_name: "John Doe".to_string(),
        image: Some(ImageUpload::new("", 0, Vec::new())),
        two_factor_enabled: false,
    };
    assert_ok!(service.update_profile(id, req).await);
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    let rows: Arc<Mutex<Vec<User>>> = Arc::default();
    let recorded = Arc::clone(&rows);
    harness.repo.expect_update().times(2).returning(move |row| {
        recorded.lock().unwrap().push(row.clone());
        Ok(())
    });
    let (service, mut rx) = harness.build();

    for _ in 0..2 {
        let req = UpdateProfileRequest {
            full_name: "Jane".to_string(),
            image: None,
            two_factor_enabled: true,
        };
        assert_ok!(service.update_profile(id, req).await);
    }

    let rows = rows.lock().unwrap();
    assert_eq!(rows[0], rows[1]);
    next_event(&mut rx).await;
    next_event(&mut rx).await;
}

// =============================================================================
// Change Email
// =============================================================================

#[tokio::test]
async fn test_change_email_stages_keys_and_publishes_link() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new();

    let writes: Arc<Mutex<Vec<(String, String, Duration)>>> = Arc::default();
    let recorded = Arc::clone(&writes);
    harness
        .pending
        .expect_set()
        .times(2)
        .returning(move |key, value, ttl| {
            recorded
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string(), ttl));
            Ok(())
        });

    let published: Arc<Mutex<Option<(String, Vec<u8>)>>> = Arc::default();
    let sink = Arc::clone(&published);
    harness
        .publisher
        .expect_publish()
        .times(1)
        .returning(move |subject, payload| {
            *sink.lock().unwrap() = Some((subject.to_string(), payload));
            Ok("1-0".to_string())
        });
    let (service, mut rx) = harness.build();

    let req = ChangeEmailRequest {
        email: "new@example.com".to_string(),
    };
    assert_ok!(service.change_email(id, req).await);

    let writes = writes.lock().unwrap();
    assert_eq!(writes[0].0, format!("newEmail:{id}"));
    assert_eq!(writes[0].1, "new@example.com");
    assert_eq!(writes[1].0, format!("changeEmailToken:{id}"));
    assert!(writes.iter().all(|(_, _, ttl)| *ttl == CHANGE_EMAIL_TTL));
    let token = &writes[1].1;
    assert_eq!(token.len(), 64);

    let (subject, payload) = published.lock().unwrap().clone().unwrap();
    assert_eq!(subject, format!("notification.mail.{id}"));
    let message: MailNotificationMessage = serde_json::from_slice(&payload).unwrap();
    assert_eq!(message.receiver, vec!["new@example.com".to_string()]);
    assert_eq!(message.msg_type, "changeEmail");
    assert_eq!(
        message.message,
        format!("http://auth.local/verify-change-email?userid={id}&changeEmailToken={token}")
    );

    // The record itself is untouched, so nothing is broadcast.
    assert_no_event(&mut rx).await;
}

#[tokio::test]
async fn test_change_email_cache_failure_aborts() {
    let mut harness = Harness::new();
    harness
        .pending
        .expect_set()
        .times(1)
        .returning(|_, _, _| Err(AppError::internal(MSG_SET_RESOURCE)));
    harness.publisher.expect_publish().never();
    let (service, _rx) = harness.build();

    let req = ChangeEmailRequest {
        email: "new@example.com".to_string(),
    };
    let err = service.change_email(Uuid::new_v4(), req).await.unwrap_err();

    assert!(matches!(err, AppError::Internal(ref msg) if msg == MSG_SET_RESOURCE));
}

#[tokio::test]
async fn test_change_email_publish_failure() {
    let mut harness = Harness::new();
    harness.pending.expect_set().times(2).returning(|_, _, _| Ok(()));
    harness
        .publisher
        .expect_publish()
        .returning(|_, _| Err(AppError::service_unavailable("redis")));
    let (service, _rx) = harness.build();

    let req = ChangeEmailRequest {
        email: "new@example.com".to_string(),
    };
    let err = service.change_email(Uuid::new_v4(), req).await.unwrap_err();

    assert!(matches!(err, AppError::Internal(ref msg) if msg == MSG_PUBLISH_MESSAGE));
}

// =============================================================================
// Change Password
// =============================================================================

#[tokio::test]
async fn test_change_password_mismatch_touches_nothing() {
    let mut harness = Harness::new();
    harness.repo.expect_find_by_id().never();
    harness.pending.expect_set().never();
    let (service, _rx) = harness.build();

    let req = ChangePasswordRequest {
        password: PASSWORD.to_string(),
        new_password: "newpass1".to_string(),
        confirm_new_password: "newpass2".to_string(),
    };
    let err = service.change_password(Uuid::new_v4(), req).await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == MSG_PASSWORD_MISMATCH));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_change_password_wrong_current_password() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness.repo.expect_update().never();
    let (service, mut rx) = harness.build();

    let req = ChangePasswordRequest {
        password: "not-the-password".to_string(),
        new_password: "newpass1".to_string(),
        confirm_new_password: "newpass1".to_string(),
    };
    let err = service.change_password(id, req).await.unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == MSG_WRONG_PASSWORD));
    assert_no_event(&mut rx).await;
}

#[tokio::test]
async fn test_change_password_stores_new_hash() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness
        .repo
        .expect_update()
        .withf(|row| {
            let hash = row.password();
            hash.verify("newpass1") && !hash.verify(PASSWORD)
        })
        .times(1)
        .returning(|_| Ok(()));
    let (service, mut rx) = harness.build();

    let req = ChangePasswordRequest {
        password: PASSWORD.to_string(),
        new_password: "newpass1".to_string(),
        confirm_new_password: "newpass1".to_string(),
    };
    assert_ok!(service.change_password(id, req).await);

    match next_event(&mut rx).await {
        UserEvent::Updated(snapshot) => assert_ne!(snapshot.password, password_hash()),
        other => panic!("unexpected event {other:?}"),
    }
}

// =============================================================================
// Delete Account
// =============================================================================

#[tokio::test]
async fn test_delete_wrong_password_leaves_row() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("me.png")));
    harness.repo.expect_delete().never();
    let (service, mut rx) = harness.build();

    let req = DeleteAccountRequest {
        password: "wrong-password".to_string(),
    };
    let err = service.delete_account(id, req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_no_event(&mut rx).await;
}

#[tokio::test]
async fn test_delete_keeps_image_and_notifies() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, Some("me.png")));
    harness
        .repo
        .expect_delete()
        .withf(move |candidate| *candidate == id)
        .times(1)
        .returning(|_| Ok(()));
    harness.images.expect_remove().never();
    let (service, mut rx) = harness.build();

    let req = DeleteAccountRequest {
        password: PASSWORD.to_string(),
    };
    assert_ok!(service.delete_account(id, req).await);
    assert_eq!(next_event(&mut rx).await, UserEvent::Deleted(id));
}

#[tokio::test]
async fn test_delete_race_reports_not_found() {
    let id = Uuid::new_v4();
    let mut harness = Harness::new().with_user(user(id, None));
    harness
        .repo
        .expect_delete()
        .returning(|_| Err(AppError::not_found(MSG_USER_NOT_FOUND)));
    let (service, mut rx) = harness.build();

    let req = DeleteAccountRequest {
        password: PASSWORD.to_string(),
    };
    let result = service.delete_account(id, req).await;

    assert_err!(&result);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    assert_no_event(&mut rx).await;
}

// =============================================================================
// Auth-domain sync
// =============================================================================

#[tokio::test]
async fn test_auth_create_user_broadcasts() {
    let id = Uuid::new_v4();
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .withf(move |row| row.id == id)
        .times(1)
        .returning(|row| Ok(row.id));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let service = AuthSync::new(Arc::new(repo), Arc::new(RecordingNotifier(tx)));

    assert_eq!(service.create_user(user(id, None)).await.unwrap(), id);

    match next_event(&mut rx).await {
        UserEvent::Created(snapshot) => assert_eq!(snapshot.id, id),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_update_missing_user_is_silent() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .returning(|_| Err(AppError::not_found(MSG_USER_NOT_FOUND)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let service = AuthSync::new(Arc::new(repo), Arc::new(RecordingNotifier(tx)));

    let err = service.update_user(user(Uuid::new_v4(), None)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_no_event(&mut rx).await;
}
