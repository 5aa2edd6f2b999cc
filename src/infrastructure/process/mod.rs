pub mod system;

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Outcome of an external process. `exit_code` is `None` when the process
/// was terminated by a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawns `program` with inherited stdio and suspends until it exits.
    /// `stdout` and `stderr` of the result are always empty.
    async fn spawn_and_wait(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput>;

    /// Runs `program` to completion on the calling thread, capturing its output.
    fn run_blocking(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput>;
}
