#[derive(Debug, Default)]
pub struct ListConsumerGroupsQueryInternal {
    pub states_filter: Vec<String>,
}
