pub mod delete_topic;
pub mod delete_topic_records;
