use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use super::error::ConversionError;
use super::model::ScratchFiles;
use crate::infrastructure::process::ProcessRunner;

pub const AUDIO_BITRATE: &str = "128k";
pub const AUDIO_SAMPLE_RATE: &str = "44100";

/// Fixed profile: drop video, 128k audio at 44.1kHz, overwrite the target.
pub fn transcode_args(files: &ScratchFiles) -> Vec<String> {
    vec![
        "-i".to_string(),
        files.source.to_string_lossy().to_string(),
        "-vn".to_string(),
        "-ab".to_string(),
        AUDIO_BITRATE.to_string(),
        "-ar".to_string(),
        AUDIO_SAMPLE_RATE.to_string(),
        "-y".to_string(),
        files.target.to_string_lossy().to_string(),
    ]
}

pub struct Transcoder {
    runner: Arc<dyn ProcessRunner>,
    ffmpeg_path: PathBuf,
}

impl Transcoder {
    pub fn new(runner: Arc<dyn ProcessRunner>, ffmpeg_path: PathBuf) -> Self {
        Self { runner, ffmpeg_path }
    }

    /// Converts `files.source` into `files.target`. A non-zero exit removes
    /// both scratch files before the error is returned.
    pub async fn transcode(&self, files: &ScratchFiles) -> Result<(), ConversionError> {
        info!("🎥 Transcoding {} -> {}", files.source.display(), files.target.display());

        let output = self
            .runner
            .spawn_and_wait(&self.ffmpeg_path, &transcode_args(files))
            .await
            .map_err(|source| ConversionError::TranscodeSpawn {
                program: self.ffmpeg_path.display().to_string(),
                source,
            })?;

        if !output.success() {
            error!(exit_code = ?output.exit_code, "error processing ffmpeg. see logs for more details");
            files.cleanup();
            return Err(ConversionError::TranscodeFailed {
                exit_code: output.exit_code,
            });
        }

        info!("🎥 Transcode finished");
        Ok(())
    }
}
