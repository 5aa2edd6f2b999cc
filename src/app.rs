use std::sync::Arc;

use anyhow::Result;

use crate::config::settings::AppConfig;
use crate::infrastructure::process::system::SystemProcessRunner;
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::infrastructure::storage::s3::StorageService;
use crate::state::AppState;

/// Connects the external collaborators described by `config`.
pub async fn create_state(config: AppConfig) -> Result<AppState> {
    let storage = StorageService::new(
        config.s3_endpoint.as_deref(),
        config.s3_region.as_deref(),
        config.s3_credentials.as_ref(),
    )
    .await;

    let queue = RabbitMqService::new(&config.amqp_url, &config.notification_topic).await?;

    Ok(AppState::new(
        config,
        Arc::new(storage),
        Arc::new(queue),
        Arc::new(SystemProcessRunner),
    ))
}
