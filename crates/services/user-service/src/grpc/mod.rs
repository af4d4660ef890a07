//! gRPC endpoints served to the auth domain.

mod user_grpc;

pub use user_grpc::UserGrpcService;
