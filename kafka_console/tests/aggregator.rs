mod common;

use common::{broker, describe_groups_response, described};
use kafka_console::error::KafkaErrorCode;
use kafka_console::gateway::{DescribeGroupsResponse, GatewayError};
use kafka_console::sharding::{
    aggregate, collapse_single, single_item, FanOutError, ShardOutcome, SingleItemError,
};

fn ok(broker_id: i32, groups: DescribeGroupsResponse) -> ShardOutcome<DescribeGroupsResponse> {
    ShardOutcome {
        broker: broker(broker_id),
        result: Ok(groups),
    }
}

fn failed(broker_id: i32, error: GatewayError) -> ShardOutcome<DescribeGroupsResponse> {
    ShardOutcome {
        broker: broker(broker_id),
        result: Err(error),
    }
}

#[test]
fn counts_sent_and_failed_requests() {
    let result = aggregate(vec![
        ok(1, describe_groups_response(vec![described("g1", 0)])),
        failed(2, GatewayError::unreachable("refused")),
        ok(3, describe_groups_response(vec![described("g2", 0)])),
    ])
    .unwrap();

    assert_eq!(result.requests_sent(), 3);
    assert_eq!(result.requests_failed(), 1);
    assert!(result.is_partial_failure());
    assert!(!result.is_total_failure());
}

#[test]
fn one_failed_shard_leaves_the_others_items() {
    let result = aggregate(vec![
        ok(1, describe_groups_response(vec![described("g1", 0)])),
        ok(2, describe_groups_response(vec![described("g2", 0)])),
        failed(3, GatewayError::Timeout { timeout: std::time::Duration::from_secs(1) }),
        ok(4, describe_groups_response(vec![described("g3", 0)])),
    ])
    .unwrap();

    let ids = result
        .succeeded_items(|response| &response.groups)
        .map(|group| group.group_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["g1", "g2", "g3"]);

    let failures = result.broker_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].broker_id, 3);
}

#[test]
fn items_with_error_codes_are_not_succeeded_but_kept() {
    let result = aggregate(vec![ok(
        1,
        describe_groups_response(vec![described("g1", 0), described("g2", 15)]),
    )])
    .unwrap();

    assert_eq!(result.succeeded_items(|response| &response.groups).count(), 1);
    assert_eq!(result.items(|response| &response.groups).count(), 2);

    let rejected = result.rejected_items(|response| &response.groups).collect::<Vec<_>>();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].0.node_id, 1);
    assert_eq!(rejected[0].1.group_id, "g2");
}

#[test]
fn total_failure_is_one_error_with_the_last_shard_error() {
    let failure = aggregate(vec![
        failed(1, GatewayError::unreachable("first")),
        failed(2, GatewayError::unreachable("second")),
        failed(3, GatewayError::unreachable("third")),
    ])
    .unwrap_err();

    assert_eq!(
        failure.error,
        FanOutError::AllFailed {
            requests_sent: 3,
            last_error: GatewayError::unreachable("third"),
        }
    );
    assert_eq!(
        failure.error.to_string(),
        "all '3' requests have failed, last error: broker is unreachable: third"
    );
    assert_eq!(failure.result.outcomes().len(), 3);
    assert_eq!(failure.result.requests_failed(), 3);
}

#[test]
fn no_targets_differs_from_all_failed() {
    let failure = aggregate(Vec::<ShardOutcome<DescribeGroupsResponse>>::new()).unwrap_err();

    assert_eq!(failure.error, FanOutError::NoTargets);
    assert_eq!(failure.result.requests_sent(), 0);
    assert_eq!(failure.result.requests_failed(), 0);
}

#[test]
fn aggregation_does_not_depend_on_arrival_order() {
    let forward = aggregate(vec![
        ok(1, describe_groups_response(vec![described("g1", 0)])),
        failed(2, GatewayError::Cancelled),
    ])
    .unwrap();
    let backward = aggregate(vec![
        failed(2, GatewayError::Cancelled),
        ok(1, describe_groups_response(vec![described("g1", 0)])),
    ])
    .unwrap();

    assert_eq!(forward.requests_sent(), backward.requests_sent());
    assert_eq!(forward.requests_failed(), backward.requests_failed());
    assert_eq!(
        forward.succeeded_items(|r| &r.groups).count(),
        backward.succeeded_items(|r| &r.groups).count()
    );
}

#[test]
fn single_item_promotes_the_item_error_code() {
    let error = single_item(vec![described("g1", 69)], "describe group").unwrap_err();

    let SingleItemError::Protocol(protocol) = error else {
        panic!("expected a protocol error, got {error:?}");
    };
    assert_eq!(protocol.kind(), Some(KafkaErrorCode::GroupIdNotFound));
}

#[test]
fn single_item_rejects_empty_and_ambiguous_answers() {
    assert_eq!(
        single_item(Vec::<kafka_console::gateway::DescribedGroup>::new(), "describe group"),
        Err(SingleItemError::Empty { what: "describe group" })
    );
    assert_eq!(
        single_item(vec![described("g1", 0), described("g2", 0)], "describe group")
            .map(|group| group.group_id),
        Err(SingleItemError::Ambiguous {
            what: "describe group",
            count: 2
        })
    );
}

#[test]
fn collapse_single_uses_only_answering_shards() {
    let result = aggregate(vec![
        failed(1, GatewayError::unreachable("down")),
        ok(2, describe_groups_response(vec![described("g1", 0)])),
    ])
    .unwrap();

    let group = collapse_single(result, "describe group", |response| response.groups).unwrap();

    assert_eq!(group.group_id, "g1");
}
