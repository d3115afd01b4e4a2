#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTopicRecordsCommandInternalResponse {
    pub topic_name: String,
    pub partitions: Vec<DeletedPartitionRecords>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedPartitionRecords {
    pub partition_id: i32,
    pub low_watermark: i64,
    pub error_message: Option<String>,
}
