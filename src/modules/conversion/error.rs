use std::error::Error as _;
use std::io;

use thiserror::Error;

use crate::infrastructure::storage::StorageError;

/// Failures of the transcode-and-publish pipeline.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Status publish failed.
    #[error("failed to publish {status} status to {topic}: {reason}")]
    Notification {
        status: &'static str,
        topic: String,
        reason: String,
    },

    /// Source fetch failed.
    #[error("failed to download {bucket}/{key}")]
    Download {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },

    /// Converter could not be launched.
    #[error("failed to launch converter {program}")]
    TranscodeSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Converter ran and exited non-zero (or was killed).
    #[error("error processing ffmpeg (exit code {}). see logs for more details", exit_code_label(.exit_code))]
    TranscodeFailed { exit_code: Option<i32> },

    /// Probe could not be launched.
    #[error("failed to launch probe {program}")]
    ProbeSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Probe exited non-zero or produced unusable output.
    #[error("ffprobe error: {reason}")]
    Probe { reason: String },

    /// Result store write failed.
    #[error("failed to upload {bucket}/{key}")]
    Upload {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

impl ConversionError {
    pub fn probe(reason: impl Into<String>) -> Self {
        Self::Probe {
            reason: reason.into(),
        }
    }

    /// Renders the error followed by its source chain, one cause per line.
    pub fn diagnostic(&self) -> String {
        let mut out = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            out.push_str("\ncaused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}
