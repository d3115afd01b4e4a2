pub mod describe_consumer_group;
pub mod describe_consumer_groups;
pub mod get_overview;
pub mod list_consumer_groups;
