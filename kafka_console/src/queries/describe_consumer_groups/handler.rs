use crate::error::{translate, translate_fan_out, ConsoleError};
use crate::gateway::{BrokerGateway, DescribeGroupsRequest};
use crate::queries::describe_consumer_groups::request::DescribeConsumerGroupsQueryInternal;
use crate::queries::describe_consumer_groups::response::DescribeConsumerGroupsQueryInternalResponse;
use crate::sharding::{aggregate, dispatch, ShardTargets};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

const ACTION: &str = "describe consumer groups";

pub async fn describe_consumer_groups(
    gateway: &Arc<dyn BrokerGateway>,
    query: DescribeConsumerGroupsQueryInternal,
    cancellation_token: &CancellationToken,
) -> Result<DescribeConsumerGroupsQueryInternalResponse, ConsoleError> {
    let request = DescribeGroupsRequest {
        groups: query.groups,
        include_authorized_operations: false,
    };
    let outcomes = dispatch(gateway, request, ShardTargets::AllBrokers, cancellation_token)
        .await
        .map_err(|e| translate(e, ACTION))?;
    let result = aggregate(outcomes).map_err(|failure| translate_fan_out(failure, ACTION))?;

    for (broker, group) in result.rejected_items(|response| &response.groups) {
        warn!(
            broker_id = broker.node_id,
            group_id = %group.group_id,
            error_code = group.error_code,
            "Group was described with an error code"
        );
    }

    Ok(DescribeConsumerGroupsQueryInternalResponse::new(result))
}
