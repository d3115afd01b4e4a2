#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTopicCommandInternalResponse {
    pub topic_name: String,
}
