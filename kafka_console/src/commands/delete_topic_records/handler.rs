use crate::commands::delete_topic_records::request::DeleteTopicRecordsCommandInternal;
use crate::commands::delete_topic_records::response::{
    DeleteTopicRecordsCommandInternalResponse, DeletedPartitionRecords,
};
use crate::error::{error_for_code, translate, ConsoleError};
use crate::gateway::{
    BrokerGateway, DeleteRecordsPartition, DeleteRecordsRequest, DeleteRecordsTopic,
};
use crate::sharding::{send_routed, single_item};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

const ACTION: &str = "delete topic records";

pub async fn delete_topic_records(
    gateway: &Arc<dyn BrokerGateway>,
    command: DeleteTopicRecordsCommandInternal,
    cancellation_token: &CancellationToken,
) -> Result<DeleteTopicRecordsCommandInternalResponse, ConsoleError> {
    let topic_name = command.topic_name;
    let with_topic = |error: ConsoleError| error.with_log_field("topic_name", topic_name.clone());

    let request = DeleteRecordsRequest {
        topics: vec![DeleteRecordsTopic {
            topic: topic_name.clone(),
            partitions: command
                .partitions
                .iter()
                .map(|p| DeleteRecordsPartition {
                    partition: p.partition,
                    offset: p.offset,
                })
                .collect(),
        }],
        timeout: command.timeout,
    };
    let response = send_routed(gateway, request, cancellation_token)
        .await
        .map_err(|e| with_topic(translate(e, ACTION)))?;
    let topic = single_item(response.topics, "delete records").map_err(|e| with_topic(translate(e, ACTION)))?;

    let partitions = topic
        .partitions
        .into_iter()
        .map(|partition| {
            let error_message = error_for_code(partition.error_code).map(|error| {
                warn!(
                    topic_name = %topic.topic,
                    partition = partition.partition,
                    "Failed to delete records of partition: {error}"
                );
                error.to_string()
            });
            DeletedPartitionRecords {
                partition_id: partition.partition,
                low_watermark: partition.low_watermark,
                error_message,
            }
        })
        .collect();

    Ok(DeleteTopicRecordsCommandInternalResponse {
        topic_name: topic.topic,
        partitions,
    })
}
