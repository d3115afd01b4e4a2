use crate::error::{error_for_code, translate, translate_fan_out, ConsoleError};
use crate::gateway::{BrokerGateway, ListGroupsRequest};
use crate::queries::list_consumer_groups::request::ListConsumerGroupsQueryInternal;
use crate::queries::list_consumer_groups::response::{
    ConsumerGroupListing, ListConsumerGroupsQueryInternalResponse,
};
use crate::sharding::{aggregate, dispatch, BrokerFailure, ShardTargets};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const ACTION: &str = "list consumer groups";

/// Every broker only knows the groups it coordinates, so the listing is sharded to all of them.
pub async fn list_consumer_groups(
    gateway: &Arc<dyn BrokerGateway>,
    query: ListConsumerGroupsQueryInternal,
    cancellation_token: &CancellationToken,
) -> Result<ListConsumerGroupsQueryInternalResponse, ConsoleError> {
    let request = ListGroupsRequest {
        states_filter: query.states_filter,
    };
    let outcomes = dispatch(gateway, request, ShardTargets::AllBrokers, cancellation_token)
        .await
        .map_err(|e| translate(e, ACTION))?;
    let result = aggregate(outcomes).map_err(|failure| translate_fan_out(failure, ACTION))?;

    let mut broker_errors = result.broker_failures();
    let mut groups = vec![];
    for (broker, response) in result.responses() {
        if let Some(error) = error_for_code(response.error_code) {
            warn!(broker_id = broker.node_id, "Broker refused to list groups: {error}");
            broker_errors.push(BrokerFailure {
                broker_id: broker.node_id,
                error: error.to_string(),
            });
            continue;
        }

        groups.extend(response.groups.iter().map(|group| ConsumerGroupListing {
            coordinator_id: broker.node_id,
            group_id: group.group_id.clone(),
            protocol_type: group.protocol_type.clone(),
            state: group.group_state.clone(),
        }));
    }
    groups.sort_by(|a, b| a.group_id.cmp(&b.group_id));

    info!(
        groups = groups.len(),
        requests_sent = result.requests_sent(),
        requests_failed = result.requests_failed(),
        "Listed consumer groups"
    );

    Ok(ListConsumerGroupsQueryInternalResponse {
        groups,
        requests_sent: result.requests_sent(),
        requests_failed: result.requests_failed(),
        broker_errors,
    })
}
