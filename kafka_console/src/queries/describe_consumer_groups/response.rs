use crate::gateway::{DescribeGroupsResponse, DescribedGroup};
use crate::sharding::AggregatedResult;
use std::ops::Deref;

#[derive(Debug)]
pub struct DescribeConsumerGroupsQueryInternalResponse {
    result: AggregatedResult<DescribeGroupsResponse>,
}

impl DescribeConsumerGroupsQueryInternalResponse {
    pub fn new(result: AggregatedResult<DescribeGroupsResponse>) -> Self {
        Self { result }
    }

    pub fn described_groups(&self) -> Vec<&DescribedGroup> {
        self.result.items(|response| &response.groups).collect()
    }

    pub fn group_ids(&self) -> Vec<String> {
        self.result
            .succeeded_items(|response| &response.groups)
            .map(|group| group.group_id.clone())
            .collect()
    }
}

impl Deref for DescribeConsumerGroupsQueryInternalResponse {
    type Target = AggregatedResult<DescribeGroupsResponse>;

    fn deref(&self) -> &Self::Target {
        &self.result
    }
}
