use std::path::Path;

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{ObjectStore, StorageError};
use crate::config::settings::StaticCredentials;

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
}

impl StorageService {
    /// Region and credentials fall back to the SDK's default provider chain
    /// (environment, profile, container or instance role).
    pub async fn new(
        endpoint: Option<&str>,
        region: Option<&str>,
        credentials: Option<&StaticCredentials>,
    ) -> Self {
        let region = RegionProviderChain::first_try(region.map(|r| Region::new(r.to_string())))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let mut builder = Builder::from(&shared);

        if let Some(keys) = credentials {
            builder = builder.credentials_provider(Credentials::new(
                &keys.access_key,
                &keys.secret_key,
                None,
                None,
                "static",
            ));
        }

        // Custom endpoints (MinIO and friends) need path-style addressing
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        info!(
            "✅ S3 client ready (region {}, endpoint {}, {} credentials)",
            shared.region().map(|r| r.as_ref()).unwrap_or(DEFAULT_REGION),
            endpoint.unwrap_or("default"),
            if credentials.is_some() { "static" } else { "default chain" },
        );

        Self { client }
    }
}

pub fn content_type_for(key: &str) -> String {
    mime_guess::from_path(key)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn download_to_file(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, StorageError> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        let mut body = object.body;
        let mut file = File::create(dest).await?;
        let mut written = 0u64;

        while let Some(chunk) = body.try_next().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;
        debug!("wrote {} bytes to {}", written, dest.display());

        Ok(written)
    }

    async fn upload_from_file(&self, bucket: &str, key: &str, source: &Path) -> Result<(), StorageError> {
        let body = ByteStream::from_path(source).await?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type_for(key))
            .body(body)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        Ok(())
    }
}
