use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub const SOURCE_EXTENSION: &str = ".webm";
pub const TARGET_EXTENSION: &str = ".mp3";

/// The single (bucket, key) pair one invocation processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub bucket: String,
    pub key: String,
}

impl WorkItem {
    pub fn new(bucket: &str, key: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub target_key: String,
    pub duration_seconds: u64,
}

/// Replaces the first `.webm` in `source_key` with `.mp3`.
///
/// Keys without `.webm` get `.mp3` appended so the target never aliases the
/// source object or scratch file.
pub fn derive_target_key(source_key: &str) -> String {
    if source_key.contains(SOURCE_EXTENSION) {
        source_key.replacen(SOURCE_EXTENSION, TARGET_EXTENSION, 1)
    } else {
        format!("{}{}", source_key, TARGET_EXTENSION)
    }
}

/// Joins the key's base name onto `scratch_dir`. Keys without a usable base
/// name (`..`, `a/..`, `/`) are flattened into one component that cannot
/// escape the directory.
fn scratch_path(scratch_dir: &Path, key: &str) -> PathBuf {
    let name = match Path::new(key).file_name() {
        Some(name) => name.to_os_string(),
        None => {
            let flat = key.replace('/', "_");
            if flat.chars().all(|c| c == '.') {
                format!("_{}", flat.replace('.', "_")).into()
            } else {
                flat.into()
            }
        }
    };
    scratch_dir.join(name)
}

/// Local source/target pair for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFiles {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl ScratchFiles {
    pub fn for_key(scratch_dir: &Path, source_key: &str) -> Self {
        Self {
            source: scratch_path(scratch_dir, source_key),
            target: scratch_path(scratch_dir, &derive_target_key(source_key)),
        }
    }

    /// Deletes both files. Never fails; a missing file is not an error and
    /// anything else is logged as a warning.
    pub fn cleanup(&self) {
        remove_scratch(&self.source);
        remove_scratch(&self.target);
    }
}

fn remove_scratch(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("removed scratch file {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("scratch file {} already absent", path.display())
        }
        Err(e) => warn!(path = %path.display(), error = %e, "error cleaning scratch file"),
    }
}
