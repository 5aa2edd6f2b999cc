use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    OutputBucket,
    NotificationTopic,
    InputBucket,
    InputSourceKey,
    AmqpUrl,
    S3Endpoint,
    S3Region,
    S3AccessKey,
    S3SecretKey,
    FfmpegPath,
    FfprobePath,
    ScratchDir,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::OutputBucket => "OUTPUT_BUCKET",
            EnvKey::NotificationTopic => "NOTIFICATION_TOPIC",
            EnvKey::InputBucket => "INPUT_BUCKET",
            EnvKey::InputSourceKey => "INPUT_SOURCE_KEY",
            EnvKey::AmqpUrl => "AMQP_URL",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::S3Region => "S3_REGION",
            EnvKey::S3AccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::S3SecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::FfmpegPath => "FFMPEG_PATH",
            EnvKey::FfprobePath => "FFPROBE_PATH",
            EnvKey::ScratchDir => "SCRATCH_DIR",
        }
    }
}

impl std::fmt::Display for EnvKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}
