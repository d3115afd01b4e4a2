mod consumer_groups;
mod delete_topic;
mod delete_topic_records;
mod get_overview;
mod shared;

pub use consumer_groups::*;
pub use delete_topic::*;
pub use delete_topic_records::*;
pub use get_overview::*;
pub use shared::*;
