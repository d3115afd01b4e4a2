use std::time::Duration;

pub const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct DeleteTopicCommandInternal {
    pub topic_name: String,
    pub timeout: Duration,
}

impl DeleteTopicCommandInternal {
    pub fn new(topic_name: impl Into<String>) -> Self {
        Self {
            topic_name: topic_name.into(),
            timeout: DEFAULT_DELETE_TIMEOUT,
        }
    }
}
