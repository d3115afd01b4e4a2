use crate::commands::delete_topic::DEFAULT_DELETE_TIMEOUT;
use std::time::Duration;

#[derive(Debug)]
pub struct DeleteTopicRecordsCommandInternal {
    pub topic_name: String,
    pub partitions: Vec<PartitionOffset>,
    pub timeout: Duration,
}

impl DeleteTopicRecordsCommandInternal {
    pub fn new(topic_name: impl Into<String>, partitions: Vec<PartitionOffset>) -> Self {
        Self {
            topic_name: topic_name.into(),
            partitions,
            timeout: DEFAULT_DELETE_TIMEOUT,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PartitionOffset {
    pub partition: i32,
    pub offset: i64,
}
