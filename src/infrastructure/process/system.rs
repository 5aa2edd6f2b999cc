use std::io;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

use super::{ProcessOutput, ProcessRunner};

/// Runs real executables on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn spawn_and_wait(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        debug!("spawning {} {:?}", program.display(), args);

        let status = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(ProcessOutput {
            exit_code: status.code(),
            ..ProcessOutput::default()
        })
    }

    fn run_blocking(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        debug!("running {} {:?}", program.display(), args);

        let output = std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
