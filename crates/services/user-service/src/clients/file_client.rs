//! gRPC client for the file service holding profile images.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use proto::file::{file_service_client::FileServiceClient, Image, ImageName};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Opaque blob storage for profile images.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the image and return its reference.
    async fn save(&self, image: Vec<u8>, ext: &str) -> AppResult<String>;

    /// Remove a previously stored image.
    async fn remove(&self, name: &str) -> AppResult<()>;
}

/// gRPC client wrapper for the file service.
pub struct FileClient {
    client: FileServiceClient<Channel>,
}

impl FileClient {
    /// Build a lazily connected client; every call carries the configured deadline.
    pub fn connect_lazy(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to file-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_lazy();

        Ok(Self {
            client: FileServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl ImageStore for FileClient {
    async fn save(&self, image: Vec<u8>, ext: &str) -> AppResult<String> {
        let request = tonic::Request::new(Image {
            image,
            ext: ext.to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .save_profile_image(request)
            .await
            .map_err(AppError::from)?;
        Ok(response.into_inner().name)
    }

    async fn remove(&self, name: &str) -> AppResult<()> {
        let request = tonic::Request::new(ImageName {
            name: name.to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .remove_profile_image(request)
            .await
            .map_err(AppError::from)?;

        if !response.into_inner().success {
            return Err(AppError::grpc(format!("file service refused to remove {name}")));
        }
        Ok(())
    }
}
