#[derive(Debug)]
pub struct DescribeConsumerGroupsQueryInternal {
    pub groups: Vec<String>,
}
