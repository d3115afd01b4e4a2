use crate::commands::delete_topic::request::DeleteTopicCommandInternal;
use crate::commands::delete_topic::response::DeleteTopicCommandInternalResponse;
use crate::error::{is_not_found, translate, ConsoleError};
use crate::gateway::{BrokerGateway, DeleteTopicsRequest, DeleteTopicsResponse};
use crate::sharding::{send_routed, single_item};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

const ACTION: &str = "delete Kafka topic";

pub async fn delete_topic(
    gateway: &Arc<dyn BrokerGateway>,
    command: DeleteTopicCommandInternal,
    cancellation_token: &CancellationToken,
) -> Result<DeleteTopicCommandInternalResponse, ConsoleError> {
    let topic_name = command.topic_name;
    let with_topic = |error: ConsoleError| {
        let is_silent = is_not_found(&error);
        error
            .with_log_field("topic_name", topic_name.clone())
            .with_silence(is_silent)
    };

    let request = DeleteTopicsRequest {
        topic_names: vec![topic_name.clone()],
        timeout: command.timeout,
    };
    let response = send_routed(gateway, request, cancellation_token)
        .await
        .map_err(|e| with_topic(translate(e, ACTION)))?;
    let deleted = single_item(response.topics, "delete topics").map_err(|e| with_topic(translate(e, ACTION)))?;

    info!(topic_name = %deleted.topic, "Deleted topic");
    Ok(DeleteTopicCommandInternalResponse {
        topic_name: deleted.topic,
    })
}

pub async fn delete_topics(
    gateway: &Arc<dyn BrokerGateway>,
    request: DeleteTopicsRequest,
    cancellation_token: &CancellationToken,
) -> Result<DeleteTopicsResponse, ConsoleError> {
    send_routed(gateway, request, cancellation_token)
        .await
        .map_err(|e| translate(e, "delete Kafka topics"))
}
