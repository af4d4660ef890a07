//! gRPC implementation of the auth-domain sync endpoints.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::service::AuthService;
use domain::User;
use proto::user::{
    user_service_server::UserService as UserServiceProto, Status as SyncStatus,
    User as ProtoUser, UserId,
};

/// gRPC service wrapper for AuthService.
pub struct UserGrpcService {
    service: Arc<dyn AuthService>,
}

impl UserGrpcService {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<ProtoUser>,
    ) -> Result<Response<SyncStatus>, Status> {
        let user = proto_to_user(request.into_inner())?;

        self.service.create_user(user).await.map_err(Status::from)?;
        Ok(Response::new(SyncStatus { success: true }))
    }

    async fn update_user(
        &self,
        request: Request<ProtoUser>,
    ) -> Result<Response<SyncStatus>, Status> {
        let user = proto_to_user(request.into_inner())?;

        self.service.update_user(user).await.map_err(Status::from)?;
        Ok(Response::new(SyncStatus { success: true }))
    }

    async fn delete_user(
        &self,
        request: Request<UserId>,
    ) -> Result<Response<SyncStatus>, Status> {
        let id = parse_uuid(&request.into_inner().user_id)?;

        self.service.delete_user(id).await.map_err(Status::from)?;
        Ok(Response::new(SyncStatus { success: true }))
    }
}

/// Parse UUID from string.
fn parse_uuid(s: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(s).map_err(|_| Status::invalid_argument("Invalid UUID"))
}

/// Convert proto User to domain User.
fn proto_to_user(proto: ProtoUser) -> Result<User, Status> {
    Ok(User {
        id: parse_uuid(&proto.id)?,
        full_name: proto.full_name,
        image: proto.image.filter(|image| !image.is_empty()),
        email: proto.email,
        password: proto.password,
        verified: proto.verified,
        two_factor_enabled: proto.two_factor_enabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockAuthService;
    use common::AppError;
    use domain::MSG_USER_NOT_FOUND;

    fn proto_user(id: &str) -> ProtoUser {
        ProtoUser {
            id: id.to_string(),
            full_name: "John Doe".to_string(),
            image: Some(String::new()),
            email: "john@example.com".to_string(),
            password: "hash".to_string(),
            verified: false,
            two_factor_enabled: false,
        }
    }

    #[tokio::test]
    async fn test_create_user_converts_record() {
        let id = Uuid::new_v4();
        let mut service = MockAuthService::new();
        service
            .expect_create_user()
            .withf(move |user| user.id == id && user.image.is_none() && !user.verified)
            .times(1)
            .returning(|user| Ok(user.id));
        let grpc = UserGrpcService::new(Arc::new(service));

        let response = grpc
            .create_user(Request::new(proto_user(&id.to_string())))
            .await
            .unwrap();
        assert!(response.into_inner().success);
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_invalid_argument() {
        let grpc = UserGrpcService::new(Arc::new(MockAuthService::new()));

        let status = grpc
            .update_user(Request::new(proto_user("not-a-uuid")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut service = MockAuthService::new();
        service
            .expect_delete_user()
            .returning(|_| Err(AppError::not_found(MSG_USER_NOT_FOUND)));
        let grpc = UserGrpcService::new(Arc::new(service));

        let status = grpc
            .delete_user(Request::new(UserId {
                user_id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), MSG_USER_NOT_FOUND);
    }
}
