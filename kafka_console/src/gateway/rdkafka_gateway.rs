use crate::admin::AdminWrapper;
use crate::connection_settings::ConnectionSettings;
use crate::gateway::{
    AdminRequest, AdminResponse, BrokerGateway, BrokerId, BrokerMetadata, ClusterMetadata,
    CoordinatorKey, DeleteRecordsPartitionResult, DeleteRecordsRequest, DeleteRecordsResponse,
    DeleteRecordsTopicResult, DeleteTopicsRequest, DeleteTopicsResponse, DeletedTopic,
    DescribeGroupsRequest, DescribeGroupsResponse, DescribedGroup, GatewayError, GroupMember,
    ListGroupsRequest, ListGroupsResponse, ListedGroup,
};
use anyhow::Context;
use async_trait::async_trait;
use rdkafka::admin::AdminOptions;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::groups::GroupInfo;
use rdkafka::util::Timeout;
use rdkafka::{Offset, TopicPartitionList};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

const GROUP_ID_NOT_FOUND: i16 = 69;

// librdkafka merges group listings of all brokers itself. The lowest node id reports the
// merged answer and acts as coordinator, every other broker answers empty.
pub struct RdKafkaGateway {
    admin: AdminWrapper,
    request_timeout: Duration,
}

impl RdKafkaGateway {
    pub fn create(
        connection_settings: &ConnectionSettings,
        request_timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let admin = AdminWrapper::create(connection_settings).context("While creating admin client")?;

        Ok(Self {
            admin,
            request_timeout,
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, GatewayError>
    where
        T: Send + 'static,
        F: FnOnce(AdminWrapper, Duration) -> Result<T, GatewayError> + Send + 'static,
    {
        let admin = self.admin.clone();
        let timeout = self.request_timeout;
        tokio::task::spawn_blocking(move || f(admin, timeout))
            .await
            .map_err(|e| GatewayError::unreachable(format!("While joining blocking handle: {e}")))?
    }

    async fn group_listing_broker(&self) -> Result<BrokerMetadata, GatewayError> {
        let metadata = self.cluster_metadata().await?;
        metadata
            .brokers
            .into_iter()
            .min_by_key(|broker| broker.node_id)
            .ok_or_else(|| GatewayError::unreachable("Cluster metadata contains no brokers"))
    }

    async fn list_groups(&self, request: ListGroupsRequest) -> Result<AdminResponse, GatewayError> {
        let response = self
            .blocking(move |admin, timeout| {
                let group_list = admin
                    .inner()
                    .fetch_group_list(None, Timeout::After(timeout))
                    .map_err(|e| transport_error(e, timeout))?;

                let groups = group_list
                    .groups()
                    .iter()
                    .filter(|group| {
                        request.states_filter.is_empty()
                            || request
                                .states_filter
                                .iter()
                                .any(|state| state.eq_ignore_ascii_case(group.state()))
                    })
                    .map(|group| ListedGroup {
                        group_id: group.name().to_owned(),
                        protocol_type: group.protocol_type().to_owned(),
                        group_state: group.state().to_owned(),
                    })
                    .collect();

                Ok(ListGroupsResponse {
                    error_code: 0,
                    groups,
                })
            })
            .await?;

        Ok(AdminResponse::ListGroups(response))
    }

    async fn describe_groups(
        &self,
        request: DescribeGroupsRequest,
    ) -> Result<AdminResponse, GatewayError> {
        let response = self
            .blocking(move |admin, timeout| {
                let mut groups = Vec::with_capacity(request.groups.len());
                for group_id in request.groups {
                    let described = match admin
                        .inner()
                        .fetch_group_list(Some(&group_id), Timeout::After(timeout))
                    {
                        Ok(list) => match list.groups().iter().find(|g| g.name() == group_id) {
                            Some(group) => described_group(group),
                            None => DescribedGroup {
                                error_code: GROUP_ID_NOT_FOUND,
                                group_id,
                                ..Default::default()
                            },
                        },
                        Err(e) => DescribedGroup {
                            error_code: protocol_error_code(e, timeout)?,
                            group_id,
                            ..Default::default()
                        },
                    };
                    groups.push(described);
                }

                Ok(DescribeGroupsResponse { groups })
            })
            .await?;

        Ok(AdminResponse::DescribeGroups(response))
    }

    async fn delete_topics(&self, request: &DeleteTopicsRequest) -> Result<AdminResponse, GatewayError> {
        let options = AdminOptions::new()
            .request_timeout(Some(self.request_timeout))
            .operation_timeout(Some(request.timeout));
        let topic_names = request.topic_names.iter().map(String::as_str).collect::<Vec<_>>();

        let results = self
            .admin
            .delete_topics(&topic_names, &options)
            .await
            .map_err(|e| transport_error(e, self.request_timeout))?;

        let topics = results
            .into_iter()
            .map(|result| match result {
                Ok(topic) => DeletedTopic {
                    topic,
                    error_code: 0,
                    error_message: None,
                },
                Err((topic, code)) => DeletedTopic {
                    topic,
                    error_code: code_to_protocol(code),
                    error_message: Some(code.to_string()),
                },
            })
            .collect();

        Ok(AdminResponse::DeleteTopics(DeleteTopicsResponse { topics }))
    }

    async fn delete_records(
        &self,
        request: &DeleteRecordsRequest,
    ) -> Result<AdminResponse, GatewayError> {
        let mut offsets = TopicPartitionList::new();
        for topic in &request.topics {
            for partition in &topic.partitions {
                offsets
                    .add_partition_offset(&topic.topic, partition.partition, Offset::Offset(partition.offset))
                    .map_err(|e| GatewayError::unreachable(format!("While building partition list: {e}")))?;
            }
        }

        let options = AdminOptions::new()
            .request_timeout(Some(self.request_timeout))
            .operation_timeout(Some(request.timeout));
        let result = self
            .admin
            .delete_records(&offsets, &options)
            .await
            .map_err(|e| transport_error(e, self.request_timeout))?;

        let mut topics: HashMap<String, Vec<DeleteRecordsPartitionResult>> = HashMap::new();
        for element in result.elements() {
            let error_code = match element.error() {
                Ok(()) => 0,
                Err(e) => protocol_error_code(e, self.request_timeout)?,
            };
            topics
                .entry(element.topic().to_owned())
                .or_default()
                .push(DeleteRecordsPartitionResult {
                    partition: element.partition(),
                    low_watermark: element.offset().to_raw().unwrap_or(-1),
                    error_code,
                });
        }

        let topics = topics
            .into_iter()
            .map(|(topic, partitions)| DeleteRecordsTopicResult { topic, partitions })
            .collect();

        Ok(AdminResponse::DeleteRecords(DeleteRecordsResponse { topics }))
    }
}

#[async_trait]
impl BrokerGateway for RdKafkaGateway {
    async fn cluster_metadata(&self) -> Result<ClusterMetadata, GatewayError> {
        self.blocking(|admin, timeout| {
            let metadata = admin
                .inner()
                .fetch_metadata(None, Timeout::After(timeout))
                .map_err(|e| transport_error(e, timeout))?;

            trace!(
                "Got cluster metadata. Brokers: {}, topics: {}",
                metadata.brokers().len(),
                metadata.topics().len()
            );

            let brokers = metadata
                .brokers()
                .iter()
                .map(|broker| {
                    Ok(BrokerMetadata {
                        node_id: broker.id(),
                        host: broker.host().to_owned(),
                        port: broker_port(broker.id(), broker.port())?,
                        rack: None,
                    })
                })
                .collect::<Result<Vec<_>, GatewayError>>()?;

            Ok(ClusterMetadata {
                cluster_id: admin.inner().fetch_cluster_id(Timeout::After(timeout)),
                controller_id: None,
                brokers,
            })
        })
        .await
    }

    async fn find_coordinator(&self, key: &CoordinatorKey) -> Result<BrokerMetadata, GatewayError> {
        let broker = self.group_listing_broker().await?;
        debug!(broker_id = broker.node_id, "Resolved coordinator for {key}");
        Ok(broker)
    }

    async fn send_to_broker(
        &self,
        broker_id: BrokerId,
        request: &AdminRequest,
    ) -> Result<AdminResponse, GatewayError> {
        match request {
            AdminRequest::ListGroups(_) | AdminRequest::DescribeGroups(_) => {
                let listing_broker = self.group_listing_broker().await?;
                if listing_broker.node_id != broker_id {
                    return Ok(empty_group_response(request));
                }
                self.send(request).await
            }
            AdminRequest::DescribeLogDirs(_) => Err(GatewayError::Unsupported {
                kind: request.kind(),
            }),
            AdminRequest::DeleteTopics(_) | AdminRequest::DeleteRecords(_) => self.send(request).await,
        }
    }

    async fn send(&self, request: &AdminRequest) -> Result<AdminResponse, GatewayError> {
        match request {
            AdminRequest::ListGroups(request) => self.list_groups(request.clone()).await,
            AdminRequest::DescribeGroups(request) => self.describe_groups(request.clone()).await,
            AdminRequest::DescribeLogDirs(_) => Err(GatewayError::Unsupported {
                kind: request.kind(),
            }),
            AdminRequest::DeleteTopics(request) => self.delete_topics(request).await,
            AdminRequest::DeleteRecords(request) => self.delete_records(request).await,
        }
    }
}

fn empty_group_response(request: &AdminRequest) -> AdminResponse {
    match request {
        AdminRequest::DescribeGroups(_) => AdminResponse::DescribeGroups(DescribeGroupsResponse::default()),
        _ => AdminResponse::ListGroups(ListGroupsResponse::default()),
    }
}

fn described_group(group: &GroupInfo) -> DescribedGroup {
    let members = group
        .members()
        .iter()
        .map(|member| GroupMember {
            member_id: member.id().to_owned(),
            instance_id: None,
            client_id: member.client_id().to_owned(),
            client_host: member.client_host().to_owned(),
            assignments: vec![],
        })
        .collect();

    DescribedGroup {
        error_code: 0,
        group_id: group.name().to_owned(),
        state: group.state().to_owned(),
        protocol_type: group.protocol_type().to_owned(),
        protocol: group.protocol().to_owned(),
        members,
    }
}

fn code_to_protocol(code: RDKafkaErrorCode) -> i16 {
    // librdkafka mirrors broker error codes and uses values below -1 for local errors
    let raw = code as i32;
    if (-1..=i16::MAX as i32).contains(&raw) {
        raw as i16
    } else {
        -1
    }
}

fn protocol_error_code(error: KafkaError, timeout: Duration) -> Result<i16, GatewayError> {
    match error.rdkafka_error_code() {
        Some(code) if (code as i32) >= 0 => Ok(code_to_protocol(code)),
        _ => Err(transport_error(error, timeout)),
    }
}

fn transport_error(error: KafkaError, timeout: Duration) -> GatewayError {
    match error.rdkafka_error_code() {
        Some(RDKafkaErrorCode::OperationTimedOut) | Some(RDKafkaErrorCode::RequestTimedOut) => {
            GatewayError::Timeout { timeout }
        }
        _ => GatewayError::unreachable(error.to_string()),
    }
}

fn broker_port(node_id: BrokerId, port: i32) -> Result<u16, GatewayError> {
    u16::try_from(port).map_err(|_| {
        GatewayError::unreachable(format!("Broker {node_id} advertises invalid port {port}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertised_port_must_fit_tcp_range() {
        assert_eq!(broker_port(1, 9092), Ok(9092));
        assert_eq!(broker_port(1, 65535), Ok(65535));
        assert_eq!(
            broker_port(2, 70000),
            Err(GatewayError::unreachable("Broker 2 advertises invalid port 70000"))
        );
        assert!(matches!(broker_port(3, -1), Err(GatewayError::Unreachable { .. })));
    }

    #[test]
    fn local_error_codes_collapse_to_unknown() {
        assert_eq!(code_to_protocol(RDKafkaErrorCode::UnknownTopicOrPartition), 3);
        assert_eq!(code_to_protocol(RDKafkaErrorCode::BrokerTransportFailure), -1);
    }
}
