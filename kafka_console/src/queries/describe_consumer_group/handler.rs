use crate::error::{translate, translate_fan_out, ConsoleError};
use crate::gateway::{BrokerGateway, CoordinatorKey, DescribeGroupsRequest, GatewayError};
use crate::queries::describe_consumer_group::request::DescribeConsumerGroupQueryInternal;
use crate::queries::describe_consumer_group::response::DescribeConsumerGroupQueryInternalResponse;
use crate::sharding::{aggregate, collapse_single, dispatch, ShardTargets};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const ACTION: &str = "describe consumer group";

pub async fn describe_consumer_group(
    gateway: &Arc<dyn BrokerGateway>,
    query: DescribeConsumerGroupQueryInternal,
    cancellation_token: &CancellationToken,
) -> Result<DescribeConsumerGroupQueryInternalResponse, ConsoleError> {
    let group_id = query.group_id;
    let with_group = |error: ConsoleError| error.with_log_field("group_id", group_id.clone());

    let request = DescribeGroupsRequest {
        groups: vec![group_id.clone()],
        include_authorized_operations: false,
    };
    let targets = ShardTargets::CoordinatorOf(CoordinatorKey::Group(group_id.clone()));
    let outcomes = dispatch(gateway, request, targets, cancellation_token)
        .await
        .map_err(|e| with_group(translate(e, ACTION)))?;
    let result = aggregate(outcomes).map_err(|failure| with_group(translate_fan_out(failure, ACTION)))?;

    let coordinator = result
        .responses()
        .map(|(broker, _)| broker.clone())
        .next()
        .ok_or_else(|| with_group(translate(GatewayError::WorkerAborted, ACTION)))?;

    let group = collapse_single(result, "describe group", |response| response.groups)
        .map_err(|e| with_group(translate(e, ACTION)))?;

    Ok(DescribeConsumerGroupQueryInternalResponse { coordinator, group })
}
