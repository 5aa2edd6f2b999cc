use std::sync::Arc;

use tracing::{error, info};

use super::error::ConversionError;
use super::events::StatusEvent;
use crate::infrastructure::queue::MessageSink;

/// Publishes status events to the notification topic, one publish per call.
#[derive(Clone)]
pub struct StatusReporter {
    sink: Arc<dyn MessageSink>,
}

impl StatusReporter {
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self { sink }
    }

    pub async fn report(&self, event: &StatusEvent) -> Result<(), ConversionError> {
        let status = event.status.name();
        let notification_error = |reason: String| ConversionError::Notification {
            status,
            topic: self.sink.topic().to_string(),
            reason,
        };

        let payload = serde_json::to_string(event).map_err(|e| notification_error(e.to_string()))?;
        info!(%payload, "reporting status update");

        if let Err(e) = self.sink.publish(payload.as_bytes()).await {
            error!(status, error = %e, "error reporting status update");
            return Err(notification_error(format!("{:#}", e)));
        }

        info!(status, "reported");
        Ok(())
    }
}
