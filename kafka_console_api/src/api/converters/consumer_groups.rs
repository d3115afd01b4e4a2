use crate::api::console_service::proto::{
    ConsumerGroupDto, ConsumerGroupListingDto, DescribeConsumerGroupQuery,
    DescribeConsumerGroupQueryResponse, DescribeConsumerGroupsQuery,
    DescribeConsumerGroupsQueryResponse, GroupMemberDto, ListConsumerGroupsQuery,
    ListConsumerGroupsQueryResponse, MemberAssignmentDto,
};
use crate::api::converters::shared::broker_failure_to_proto;
use anyhow::bail;
use kafka_console::error::error_for_code;
use kafka_console::gateway::{BrokerId, DescribedGroup, GroupMember};
use kafka_console::queries::describe_consumer_group::{
    DescribeConsumerGroupQueryInternal, DescribeConsumerGroupQueryInternalResponse,
};
use kafka_console::queries::describe_consumer_groups::{
    DescribeConsumerGroupsQueryInternal, DescribeConsumerGroupsQueryInternalResponse,
};
use kafka_console::queries::list_consumer_groups::{
    ListConsumerGroupsQueryInternal, ListConsumerGroupsQueryInternalResponse,
};
use rayon::prelude::*;

pub fn proto_list_consumer_groups_to_internal(model: ListConsumerGroupsQuery) -> ListConsumerGroupsQueryInternal {
    ListConsumerGroupsQueryInternal {
        states_filter: model.states_filter,
    }
}

pub fn list_consumer_groups_to_proto_response(
    model: ListConsumerGroupsQueryInternalResponse,
) -> ListConsumerGroupsQueryResponse {
    let groups = model
        .groups
        .into_par_iter()
        .map(|x| ConsumerGroupListingDto {
            coordinator_id: x.coordinator_id,
            group_id: x.group_id,
            protocol_type: x.protocol_type,
            state: x.state,
        })
        .collect();

    ListConsumerGroupsQueryResponse {
        groups,
        requests_sent: model.requests_sent as u32,
        requests_failed: model.requests_failed as u32,
        broker_errors: model.broker_errors.into_iter().map(broker_failure_to_proto).collect(),
    }
}

pub fn proto_describe_consumer_groups_to_internal(
    model: DescribeConsumerGroupsQuery,
) -> Result<DescribeConsumerGroupsQueryInternal, anyhow::Error> {
    if model.groups.is_empty() {
        bail!("Groups can't be empty")
    }
    if model.groups.iter().any(|group| group.trim().is_empty()) {
        bail!("Group id can't be empty")
    }

    Ok(DescribeConsumerGroupsQueryInternal {
        groups: model.groups,
    })
}

/// Groups of every broker that answered, including groups described with an error code.
pub fn describe_consumer_groups_to_proto_response(
    model: DescribeConsumerGroupsQueryInternalResponse,
) -> DescribeConsumerGroupsQueryResponse {
    let groups = model
        .responses()
        .flat_map(|(broker, response)| {
            response
                .groups
                .iter()
                .map(move |group| described_group_to_proto(broker.node_id, group.clone()))
        })
        .collect();

    DescribeConsumerGroupsQueryResponse {
        groups,
        requests_sent: model.requests_sent() as u32,
        requests_failed: model.requests_failed() as u32,
        broker_errors: model
            .broker_failures()
            .into_iter()
            .map(broker_failure_to_proto)
            .collect(),
    }
}

pub fn proto_describe_consumer_group_to_internal(
    model: DescribeConsumerGroupQuery,
) -> Result<DescribeConsumerGroupQueryInternal, anyhow::Error> {
    if model.group_id.trim().is_empty() {
        bail!("Group id can't be empty")
    }

    Ok(DescribeConsumerGroupQueryInternal {
        group_id: model.group_id,
    })
}

pub fn describe_consumer_group_to_proto_response(
    model: DescribeConsumerGroupQueryInternalResponse,
) -> DescribeConsumerGroupQueryResponse {
    DescribeConsumerGroupQueryResponse {
        group: Some(described_group_to_proto(model.coordinator.node_id, model.group)),
    }
}

fn described_group_to_proto(broker_id: BrokerId, group: DescribedGroup) -> ConsumerGroupDto {
    ConsumerGroupDto {
        broker_id,
        error: error_for_code(group.error_code).map(|error| error.to_string()),
        error_code: group.error_code as i32,
        group_id: group.group_id,
        state: group.state,
        protocol_type: group.protocol_type,
        protocol: group.protocol,
        members: group.members.into_iter().map(group_member_to_proto).collect(),
    }
}

fn group_member_to_proto(member: GroupMember) -> GroupMemberDto {
    GroupMemberDto {
        member_id: member.member_id,
        instance_id: member.instance_id,
        client_id: member.client_id,
        client_host: member.client_host,
        assignments: member
            .assignments
            .into_iter()
            .map(|assignment| MemberAssignmentDto {
                topic: assignment.topic,
                partitions: assignment.partitions,
            })
            .collect(),
    }
}
