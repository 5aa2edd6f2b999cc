use std::path::Path;

use tracing::{error, info};

use super::error::ConversionError;
use crate::infrastructure::storage::ObjectStore;

pub async fn upload(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    source: &Path,
) -> Result<(), ConversionError> {
    info!("⬆️ Uploading {} to bucket {} and key {}", source.display(), bucket, key);

    store
        .upload_from_file(bucket, key, source)
        .await
        .map_err(|source| {
            error!(error = %source, "error uploading result");
            ConversionError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source,
            }
        })?;

    info!("⬆️ Upload finished");
    Ok(())
}
