use crate::api::console_service::proto::{DeleteTopicCommand, DeleteTopicCommandResponse};
use crate::api::converters::shared::proto_timeout_to_internal;
use anyhow::bail;
use kafka_console::commands::delete_topic::{
    DeleteTopicCommandInternal, DeleteTopicCommandInternalResponse, DEFAULT_DELETE_TIMEOUT,
};

pub fn proto_delete_topic_to_internal(model: DeleteTopicCommand) -> Result<DeleteTopicCommandInternal, anyhow::Error> {
    if model.topic_name.trim().is_empty() {
        bail!("Topic name can't be empty")
    }

    Ok(DeleteTopicCommandInternal {
        topic_name: model.topic_name,
        timeout: proto_timeout_to_internal(model.timeout_ms, DEFAULT_DELETE_TIMEOUT),
    })
}

pub fn delete_topic_to_proto_response(model: DeleteTopicCommandInternalResponse) -> DeleteTopicCommandResponse {
    DeleteTopicCommandResponse {
        topic_name: model.topic_name,
    }
}
