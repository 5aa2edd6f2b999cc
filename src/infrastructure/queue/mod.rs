pub mod rabbitmq;

use anyhow::Result;
use async_trait::async_trait;

/// Fire-and-forget publisher bound to a single topic.
#[async_trait]
pub trait MessageSink: Send + Sync {
    fn topic(&self) -> &str;

    /// Publishes one message. Implementations must not retry.
    async fn publish(&self, payload: &[u8]) -> Result<()>;
}
