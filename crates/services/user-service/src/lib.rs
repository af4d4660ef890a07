//! User Service Library
//!
//! Owns user profile records. Serves the profile self-service HTTP API and
//! the gRPC endpoints the auth domain uses to keep records in sync.

pub mod clients;
pub mod config;
pub mod events;
pub mod grpc;
pub mod http;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::clients::FileClient;
use crate::config::UserServiceConfig;
use crate::events::{RedisEventBus, RedisStreamPublisher};
use crate::grpc::UserGrpcService;
use crate::http::handlers::HealthProbe;
use crate::http::middleware::TokenVerifier;
use crate::http::{create_router, AppState};
use crate::infra::{Database, RedisCache};
use crate::repository::UserStore;
use crate::service::{AuthSync, ConfirmationLinks, UserManager};

/// Run both servers with configuration loaded from the environment.
pub async fn run(
    http_port: Option<u16>,
    grpc_port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = UserServiceConfig::from_env();
    if let Some(port) = http_port {
        config.http.port = port;
    }
    if let Some(port) = grpc_port {
        config.grpc.port = port;
    }
    run_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn run_with_config(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Backing services
    let db = Database::connect(&config.database).await?;
    let cache = RedisCache::connect(&config.cache).await?;
    let file_client = FileClient::connect_lazy(&config.file_service)?;

    // Ports
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let publisher = Arc::new(RedisStreamPublisher::new(
        cache.connection(),
        config.streams.notification_stream.clone(),
    ));
    let notifier = Arc::new(RedisEventBus::new(
        cache.connection(),
        config.streams.event_stream.clone(),
        config.streams.event_source.clone(),
    ));

    // Services
    let user_service = Arc::new(UserManager::new(
        user_repo.clone(),
        Arc::new(file_client),
        Arc::new(cache.clone()),
        publisher,
        notifier.clone(),
        ConfirmationLinks {
            auth_url: config.auth_url.clone(),
            verification_path: config.verification_path.clone(),
            mail_subject: config.streams.mail_subject.clone(),
        },
    ));
    let auth_service = Arc::new(AuthSync::new(user_repo, notifier));

    // HTTP
    let probes: Vec<Arc<dyn HealthProbe>> = vec![Arc::new(db), Arc::new(cache)];
    let state = AppState::new(user_service, TokenVerifier::new(&config.jwt.secret), probes);
    let app = create_router(state, &config.cors);
    let http_addr: SocketAddr = config.http.address().parse()?;
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    info!("User service HTTP listening on {}", http_addr);

    // gRPC
    let grpc_addr: SocketAddr = config.grpc.address().parse()?;
    let grpc = Server::builder()
        .add_service(proto::UserServiceServer::new(UserGrpcService::new(auth_service)))
        .serve(grpc_addr);
    info!("User service gRPC listening on {}", grpc_addr);

    tokio::try_join!(
        async { axum::serve(listener, app).await.map_err(Box::<dyn std::error::Error>::from) },
        async { grpc.await.map_err(Box::<dyn std::error::Error>::from) },
    )?;

    Ok(())
}
