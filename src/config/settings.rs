use std::path::PathBuf;

use thiserror::Error;

use crate::config::env::{self, EnvKey};
use crate::modules::conversion::model::WorkItem;

const DEFAULT_AMQP_URL: &str = "amqp://127.0.0.1:5672/%2f";
const DEFAULT_FFMPEG_PATH: &str = "/usr/local/bin/ffmpeg";
const DEFAULT_FFPROBE_PATH: &str = "/usr/local/bin/ffprobe";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(EnvKey),

    #[error("environment variable {0} is set but blank")]
    Blank(EnvKey),
}

/// Static S3 keys. When absent the SDK's default provider chain is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub output_bucket: String,
    pub notification_topic: String,
    pub input_bucket: String,
    pub input_source_key: String,
    pub amqp_url: String,
    pub s3_endpoint: Option<String>,
    pub s3_region: Option<String>,
    pub s3_credentials: Option<StaticCredentials>,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub scratch_dir: PathBuf,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::get(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, failing on the first
    /// required key that is absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(EnvKey) -> Option<String>,
    {
        let required = |key: EnvKey| match lookup(key) {
            None => Err(ConfigError::Missing(key)),
            Some(value) if value.trim().is_empty() => Err(ConfigError::Blank(key)),
            Some(value) => Ok(value),
        };
        let optional = |key: EnvKey| lookup(key).filter(|value| !value.trim().is_empty());

        // Keys come as a pair or not at all.
        let s3_credentials = match (optional(EnvKey::S3AccessKey), optional(EnvKey::S3SecretKey)) {
            (Some(access_key), Some(secret_key)) => Some(StaticCredentials {
                access_key,
                secret_key,
            }),
            (Some(_), None) => return Err(ConfigError::Missing(EnvKey::S3SecretKey)),
            (None, Some(_)) => return Err(ConfigError::Missing(EnvKey::S3AccessKey)),
            (None, None) => None,
        };

        Ok(Self {
            output_bucket: required(EnvKey::OutputBucket)?,
            notification_topic: required(EnvKey::NotificationTopic)?,
            input_bucket: required(EnvKey::InputBucket)?,
            input_source_key: required(EnvKey::InputSourceKey)?,
            amqp_url: optional(EnvKey::AmqpUrl).unwrap_or_else(|| DEFAULT_AMQP_URL.to_string()),
            s3_endpoint: optional(EnvKey::S3Endpoint),
            s3_region: optional(EnvKey::S3Region),
            s3_credentials,
            ffmpeg_path: optional(EnvKey::FfmpegPath)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FFMPEG_PATH)),
            ffprobe_path: optional(EnvKey::FfprobePath)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FFPROBE_PATH)),
            scratch_dir: optional(EnvKey::ScratchDir)
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        })
    }

    pub fn work_item(&self) -> WorkItem {
        WorkItem::new(&self.input_bucket, &self.input_source_key)
    }
}
