#[derive(Debug)]
pub struct DescribeConsumerGroupQueryInternal {
    pub group_id: String,
}
