use crate::api::console_service::proto::{
    DeleteTopicRecordsCommand, DeleteTopicRecordsCommandResponse, DeletedPartitionRecordsDto,
};
use crate::api::converters::shared::proto_timeout_to_internal;
use anyhow::bail;
use kafka_console::commands::delete_topic::DEFAULT_DELETE_TIMEOUT;
use kafka_console::commands::delete_topic_records::{
    DeleteTopicRecordsCommandInternal, DeleteTopicRecordsCommandInternalResponse, PartitionOffset,
};

pub fn proto_delete_topic_records_to_internal(
    model: DeleteTopicRecordsCommand,
) -> Result<DeleteTopicRecordsCommandInternal, anyhow::Error> {
    if model.topic_name.trim().is_empty() {
        bail!("Topic name can't be empty")
    }
    if model.partitions.is_empty() {
        bail!("Partitions can't be empty")
    }
    if let Some(partition) = model.partitions.iter().find(|p| p.partition < 0) {
        bail!("Partition can't be negative, got {}", partition.partition)
    }

    let partitions = model
        .partitions
        .into_iter()
        .map(|p| PartitionOffset {
            partition: p.partition,
            offset: p.offset,
        })
        .collect();

    Ok(DeleteTopicRecordsCommandInternal {
        topic_name: model.topic_name,
        partitions,
        timeout: proto_timeout_to_internal(model.timeout_ms, DEFAULT_DELETE_TIMEOUT),
    })
}

pub fn delete_topic_records_to_proto_response(
    model: DeleteTopicRecordsCommandInternalResponse,
) -> DeleteTopicRecordsCommandResponse {
    let partitions = model
        .partitions
        .into_iter()
        .map(|p| DeletedPartitionRecordsDto {
            partition_id: p.partition_id,
            low_watermark: p.low_watermark,
            error: p.error_message,
        })
        .collect();

    DeleteTopicRecordsCommandResponse {
        topic_name: model.topic_name,
        partitions,
    }
}
