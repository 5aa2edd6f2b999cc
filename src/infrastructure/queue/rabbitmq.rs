use anyhow::{anyhow, Result};
use async_trait::async_trait;
use lapin::{
    options::*, types::FieldTable, BasicProperties, Channel, Connection,
    ConnectionProperties,
};
use tracing::info;

use super::MessageSink;

pub struct RabbitMqService {
    topic: String,
    // Held so the channel stays open for the lifetime of the service.
    _conn: Connection,
    channel: Channel,
}

impl RabbitMqService {
    async fn connect(url: &str) -> Result<(Connection, Channel)> {
        info!("Connecting to RabbitMQ");
        let conn = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow!("Failed to connect to RabbitMQ: {}", e))?;

        let channel = conn
            .create_channel()
            .await
            .map_err(|e| anyhow!("Failed to create channel: {}", e))?;

        info!("✅ Connected to RabbitMQ");
        Ok((conn, channel))
    }

    /// Connects and declares the durable status queue named by `topic`.
    pub async fn new(url: &str, topic: &str) -> Result<Self> {
        let (conn, channel) = Self::connect(url).await?;

        channel
            .queue_declare(
                topic,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to declare queue: {}", e))?;

        Ok(Self {
            topic: topic.to_string(),
            _conn: conn,
            channel,
        })
    }
}

#[async_trait]
impl MessageSink for RabbitMqService {
    fn topic(&self) -> &str {
        &self.topic
    }

    async fn publish(&self, payload: &[u8]) -> Result<()> {
        self.channel
            .basic_publish(
                "",
                &self.topic,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_delivery_mode(2), // Persistent
            )
            .await
            .map_err(|e| anyhow!("Failed to publish message: {}", e))?
            .await
            .map_err(|e| anyhow!("Failed to confirm publication: {}", e))?;

        Ok(())
    }
}
