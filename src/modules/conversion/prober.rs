use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use super::error::ConversionError;
use crate::infrastructure::process::ProcessRunner;

/// Arguments asking ffprobe for the bare container duration.
pub fn probe_args(file: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=nw=1:nk=1".to_string(),
        file.to_string_lossy().to_string(),
    ]
}

/// Parses probe stdout as seconds, rounded up to a whole second.
pub fn parse_duration(stdout: &str) -> Result<u64, ConversionError> {
    let trimmed = stdout.trim();
    let seconds: f64 = trimmed
        .parse()
        .map_err(|_| ConversionError::probe(format!("unparseable duration {:?}", trimmed)))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ConversionError::probe(format!("invalid duration {}", seconds)));
    }

    Ok(seconds.ceil() as u64)
}

pub struct DurationProber {
    runner: Arc<dyn ProcessRunner>,
    ffprobe_path: PathBuf,
}

impl DurationProber {
    pub fn new(runner: Arc<dyn ProcessRunner>, ffprobe_path: PathBuf) -> Self {
        Self { runner, ffprobe_path }
    }

    /// Blocks the calling thread until the probe exits.
    pub fn probe_duration(&self, file: &Path) -> Result<u64, ConversionError> {
        info!("getting file duration of {}", file.display());

        let output = self
            .runner
            .run_blocking(&self.ffprobe_path, &probe_args(file))
            .map_err(|source| ConversionError::ProbeSpawn {
                program: self.ffprobe_path.display().to_string(),
                source,
            })?;

        debug!(stdout = %output.stdout, stderr = %output.stderr, "ffprobe result");

        if !output.success() {
            error!(exit_code = ?output.exit_code, stderr = %output.stderr, "ffprobe failed");
            return Err(ConversionError::probe(output.stderr.trim().to_string()));
        }

        let seconds = parse_duration(&output.stdout)?;
        info!("duration is {} seconds", seconds);
        Ok(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRunner;

    #[test]
    fn test_parse_duration_rounds_up() {
        assert_eq!(parse_duration("12.1").unwrap(), 13);
        assert_eq!(parse_duration("45.6\n").unwrap(), 46);
        assert_eq!(parse_duration("0.001").unwrap(), 1);
    }

    #[test]
    fn test_parse_duration_whole_seconds() {
        assert_eq!(parse_duration("12.0").unwrap(), 12);
        assert_eq!(parse_duration(" 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(parse_duration("N/A"), Err(ConversionError::Probe { .. })));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-3.5").is_err());
        assert!(parse_duration("inf").is_err());
    }

    #[test]
    fn test_probe_args() {
        let args = probe_args(Path::new("/tmp/talk.mp3"));
        assert_eq!(
            args,
            vec![
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=nw=1:nk=1",
                "/tmp/talk.mp3"
            ]
        );
    }

    #[test]
    fn test_probe_duration_uses_configured_binary() {
        let runner = Arc::new(ScriptedRunner::new().with_probe("45.6\n", 0));
        let prober = DurationProber::new(runner.clone(), PathBuf::from("/opt/ffprobe"));

        assert_eq!(prober.probe_duration(Path::new("/tmp/talk.mp3")).unwrap(), 46);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("/opt/ffprobe"));
    }

    #[test]
    fn test_probe_nonzero_exit_carries_stderr() {
        let runner = Arc::new(
            ScriptedRunner::new().with_probe_failure(1, "/tmp/talk.mp3: Invalid data found"),
        );
        let prober = DurationProber::new(runner, PathBuf::from("ffprobe"));

        let err = prober.probe_duration(Path::new("/tmp/talk.mp3")).unwrap_err();
        assert!(err.to_string().contains("Invalid data found"));
    }
}
