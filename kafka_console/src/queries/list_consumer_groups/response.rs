use crate::gateway::BrokerId;
use crate::sharding::BrokerFailure;

#[derive(Debug)]
pub struct ListConsumerGroupsQueryInternalResponse {
    pub groups: Vec<ConsumerGroupListing>,
    pub requests_sent: usize,
    pub requests_failed: usize,
    pub broker_errors: Vec<BrokerFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerGroupListing {
    pub coordinator_id: BrokerId,
    pub group_id: String,
    pub protocol_type: String,
    pub state: String,
}
