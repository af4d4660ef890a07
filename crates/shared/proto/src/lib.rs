//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - UserService: profile row sync called by the auth domain
//! - FileService: profile image storage, called by the user-service

/// User service definitions.
pub mod user {
    tonic::include_proto!("user");
}

/// File service definitions.
pub mod file {
    tonic::include_proto!("file");
}

// Re-export commonly used items
pub use file::file_service_client::FileServiceClient;
pub use user::user_service_client::UserServiceClient;
pub use user::user_service_server::{UserService, UserServiceServer};
