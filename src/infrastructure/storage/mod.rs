pub mod s3;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Request(#[from] aws_sdk_s3::Error),

    #[error(transparent)]
    Stream(#[from] aws_sdk_s3::primitives::ByteStreamError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Blob store addressed by (bucket, key).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Streams an object into `dest`, truncating any existing file.
    /// Returns the number of bytes written.
    async fn download_to_file(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, StorageError>;

    /// Streams the contents of `source` into the object at (bucket, key).
    async fn upload_from_file(&self, bucket: &str, key: &str, source: &Path) -> Result<(), StorageError>;
}
