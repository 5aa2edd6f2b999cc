use std::path::Path;

use tracing::{error, info};

use super::error::ConversionError;
use crate::infrastructure::storage::ObjectStore;

/// Downloads `bucket/key` to `dest`. On failure `dest` may hold partial bytes.
pub async fn download(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    dest: &Path,
) -> Result<(), ConversionError> {
    info!("⬇️ Downloading from bucket {} and key {} to {}", bucket, key, dest.display());

    match store.download_to_file(bucket, key, dest).await {
        Ok(bytes) => {
            info!("⬇️ Downloaded {} bytes", bytes);
            Ok(())
        }
        Err(source) => {
            error!(error = %source, "error writing to result file");
            Err(ConversionError::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source,
            })
        }
    }
}
