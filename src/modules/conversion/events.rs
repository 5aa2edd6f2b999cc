use serde::Serialize;

use super::model::{ConversionResult, WorkItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDetail {
    pub result_key: String,
    pub duration_seconds: u64,
}

/// Phase of the job, with the detail each phase carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "UPPERCASE")]
pub enum Status {
    Processing,
    Error(String),
    Complete(CompletionDetail),
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Processing => "PROCESSING",
            Status::Error(_) => "ERROR",
            Status::Complete(_) => "COMPLETE",
        }
    }
}

/// Wire payload: `{bucket, key, status, detail}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub bucket: String,
    pub key: String,
    #[serde(flatten)]
    pub status: Status,
}

impl StatusEvent {
    fn new(item: &WorkItem, status: Status) -> Self {
        Self {
            bucket: item.bucket.clone(),
            key: item.key.clone(),
            status,
        }
    }

    pub fn processing(item: &WorkItem) -> Self {
        Self::new(item, Status::Processing)
    }

    pub fn error(item: &WorkItem, detail: impl Into<String>) -> Self {
        Self::new(item, Status::Error(detail.into()))
    }

    pub fn complete(item: &WorkItem, result: &ConversionResult) -> Self {
        Self::new(
            item,
            Status::Complete(CompletionDetail {
                result_key: result.target_key.clone(),
                duration_seconds: result.duration_seconds,
            }),
        )
    }
}
