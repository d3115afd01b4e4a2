use crate::gateway::{BrokerMetadata, DescribedGroup};

#[derive(Debug)]
pub struct DescribeConsumerGroupQueryInternalResponse {
    pub coordinator: BrokerMetadata,
    pub group: DescribedGroup,
}
