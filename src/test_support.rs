//! In-memory stand-ins for the object store, the status topic and the
//! external executables.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::infrastructure::process::{ProcessOutput, ProcessRunner};
use crate::infrastructure::queue::MessageSink;
use crate::infrastructure::storage::{ObjectStore, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    fail_uploads: bool,
    fail_downloads_after_write: bool,
    uploads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, bucket: &str, key: &str, data: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
        self
    }

    pub fn failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    /// Downloads write half of the object to `dest`, then fail.
    pub fn failing_downloads_after_write(mut self) -> Self {
        self.fail_downloads_after_write = true;
        self
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn upload_attempts(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn download_to_file(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, StorageError> {
        let data = self.object(bucket, key).ok_or_else(|| {
            StorageError::Io(io::Error::new(io::ErrorKind::NotFound, "NoSuchKey"))
        })?;
        if self.fail_downloads_after_write {
            tokio::fs::write(dest, &data[..data.len() / 2]).await?;
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset mid-stream",
            )));
        }
        tokio::fs::write(dest, &data).await?;
        Ok(data.len() as u64)
    }

    async fn upload_from_file(&self, bucket: &str, key: &str, source: &Path) -> Result<(), StorageError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads {
            return Err(StorageError::Io(io::Error::other("simulated PutObject failure")));
        }
        let data = tokio::fs::read(source).await?;
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data);
        Ok(())
    }
}

pub struct RecordingSink {
    topic: String,
    published: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    fail_from: Option<usize>,
    fail_at: Option<usize>,
}

impl RecordingSink {
    pub fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            published: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            fail_from: None,
            fail_at: None,
        }
    }

    /// Every publish attempt from the `n`th (zero-based) onwards fails.
    pub fn failing_from(mut self, n: usize) -> Self {
        self.fail_from = Some(n);
        self
    }

    /// Only the `n`th (zero-based) publish attempt fails.
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<serde_json::Value> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|p| serde_json::from_str(p).unwrap())
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| e["status"].as_str().unwrap().to_string())
            .collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    async fn publish(&self, payload: &[u8]) -> anyhow::Result<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_from.is_some_and(|n| attempt >= n) || self.fail_at == Some(attempt) {
            return Err(anyhow!("broker unavailable"));
        }
        self.published
            .lock()
            .unwrap()
            .push(String::from_utf8(payload.to_vec()).unwrap());
        Ok(())
    }
}

/// Plays ffmpeg (async spawn) and ffprobe (blocking run). A successful
/// transcode writes a placeholder file at the last argument.
pub struct ScriptedRunner {
    transcode_exit: Option<i32>,
    probe: ProcessOutput,
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            transcode_exit: Some(0),
            probe: ProcessOutput {
                exit_code: Some(0),
                stdout: "45.6\n".to_string(),
                stderr: String::new(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_transcode_exit(mut self, exit_code: Option<i32>) -> Self {
        self.transcode_exit = exit_code;
        self
    }

    pub fn with_probe(mut self, stdout: &str, exit_code: i32) -> Self {
        self.probe.stdout = stdout.to_string();
        self.probe.exit_code = Some(exit_code);
        self
    }

    pub fn with_probe_failure(mut self, exit_code: i32, stderr: &str) -> Self {
        self.probe = ProcessOutput {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        };
        self
    }

    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, program: &Path, args: &[String]) {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn spawn_and_wait(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        self.record(program, args);
        if self.transcode_exit == Some(0) {
            if let Some(target) = args.last() {
                tokio::fs::write(target, b"ID3-mp3-bytes").await?;
            }
        }
        Ok(ProcessOutput {
            exit_code: self.transcode_exit,
            ..ProcessOutput::default()
        })
    }

    fn run_blocking(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        self.record(program, args);
        Ok(self.probe.clone())
    }
}
