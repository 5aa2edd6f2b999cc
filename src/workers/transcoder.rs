use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::modules::conversion::error::ConversionError;
use crate::modules::conversion::events::StatusEvent;
use crate::modules::conversion::model::{ConversionResult, ScratchFiles, WorkItem, derive_target_key};
use crate::modules::conversion::prober::DurationProber;
use crate::modules::conversion::reporter::StatusReporter;
use crate::modules::conversion::transcoder::Transcoder;
use crate::modules::conversion::{fetcher, publisher};
use crate::state::AppState;

/// How a fully reported run ended.
#[derive(Debug)]
pub enum JobOutcome {
    Completed(ConversionResult),
    Failed(ConversionError),
}

/// Processes the configured work item once.
///
/// Returns `Err` only when a status event could not be published; a pipeline
/// failure that was reported as ERROR is `Ok(JobOutcome::Failed)`.
pub async fn run(state: &AppState) -> Result<JobOutcome, ConversionError> {
    let item = state.config.work_item();
    let span = info_span!(
        "transcode",
        run_id = %Uuid::new_v4(),
        bucket = %item.bucket,
        key = %item.key,
    );

    process_item(state, &item).instrument(span).await
}

async fn process_item(state: &AppState, item: &WorkItem) -> Result<JobOutcome, ConversionError> {
    let reporter = StatusReporter::new(state.queue.clone());
    reporter.report(&StatusEvent::processing(item)).await?;

    let scratch = ScratchFiles::for_key(&state.config.scratch_dir, &item.key);
    let result = convert(state, item, &scratch).await;
    scratch.cleanup();

    let err = match result {
        Ok(result) => match reporter.report(&StatusEvent::complete(item, &result)).await {
            Ok(()) => {
                info!(result_key = %result.target_key, duration_seconds = result.duration_seconds, "✅ Job completed");
                return Ok(JobOutcome::Completed(result));
            }
            Err(e) => e,
        },
        Err(e) => e,
    };

    error!(error = %err, "❌ error found during processing");
    reporter
        .report(&StatusEvent::error(item, err.diagnostic()))
        .await?;

    Ok(JobOutcome::Failed(err))
}

async fn convert(
    state: &AppState,
    item: &WorkItem,
    scratch: &ScratchFiles,
) -> Result<ConversionResult, ConversionError> {
    let config = &state.config;
    let target_key = derive_target_key(&item.key);

    fetcher::download(state.storage.as_ref(), &item.bucket, &item.key, &scratch.source).await?;

    Transcoder::new(state.runner.clone(), config.ffmpeg_path.clone())
        .transcode(scratch)
        .await?;

    let duration_seconds =
        DurationProber::new(state.runner.clone(), config.ffprobe_path.clone()).probe_duration(&scratch.target)?;

    publisher::upload(state.storage.as_ref(), &config.output_bucket, &target_key, &scratch.target).await?;

    Ok(ConversionResult {
        target_key,
        duration_seconds,
    })
}
