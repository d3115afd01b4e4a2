#![allow(dead_code)]

use async_trait::async_trait;
use kafka_console::gateway::{
    AdminRequest, AdminResponse, BrokerGateway, BrokerId, BrokerMetadata, ClusterMetadata,
    CoordinatorKey, DescribeGroupsResponse, DescribedGroup, GatewayError, RequestKind,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How one scripted broker reacts to every request it gets.
#[derive(Clone)]
pub enum BrokerBehaviour {
    Respond(AdminResponse),
    Fail(GatewayError),
    Delay(Duration, AdminResponse),
    Hang,
    Panic,
}

/// In-memory cluster answering with scripted responses.
pub struct FakeGateway {
    brokers: Vec<BrokerMetadata>,
    controller_id: Option<BrokerId>,
    metadata_error: Option<GatewayError>,
    metadata_hangs: bool,
    coordinator: Option<BrokerId>,
    behaviours: HashMap<BrokerId, BrokerBehaviour>,
    routed: Option<Result<AdminResponse, GatewayError>>,
    sent: Mutex<Vec<(Option<BrokerId>, RequestKind)>>,
}

impl FakeGateway {
    pub fn with_brokers(broker_ids: &[BrokerId]) -> Self {
        Self {
            brokers: broker_ids.iter().map(|id| broker(*id)).collect(),
            controller_id: broker_ids.first().copied(),
            metadata_error: None,
            metadata_hangs: false,
            coordinator: None,
            behaviours: HashMap::new(),
            routed: None,
            sent: Mutex::new(vec![]),
        }
    }

    pub fn behave(mut self, broker_id: BrokerId, behaviour: BrokerBehaviour) -> Self {
        self.behaviours.insert(broker_id, behaviour);
        self
    }

    pub fn respond(self, broker_id: BrokerId, response: impl Into<AdminResponse>) -> Self {
        self.behave(broker_id, BrokerBehaviour::Respond(response.into()))
    }

    pub fn fail(self, broker_id: BrokerId, error: GatewayError) -> Self {
        self.behave(broker_id, BrokerBehaviour::Fail(error))
    }

    pub fn coordinator(mut self, broker_id: BrokerId) -> Self {
        self.coordinator = Some(broker_id);
        self
    }

    pub fn metadata_error(mut self, error: GatewayError) -> Self {
        self.metadata_error = Some(error);
        self
    }

    pub fn hang_metadata(mut self) -> Self {
        self.metadata_hangs = true;
        self
    }

    pub fn routed(mut self, result: Result<AdminResponse, GatewayError>) -> Self {
        self.routed = Some(result);
        self
    }

    pub fn shared(self) -> Arc<dyn BrokerGateway> {
        Arc::new(self)
    }

    pub fn sent(&self) -> Vec<(Option<BrokerId>, RequestKind)> {
        self.sent.lock().unwrap().clone()
    }
}

pub fn broker(node_id: BrokerId) -> BrokerMetadata {
    BrokerMetadata {
        node_id,
        host: format!("broker-{node_id}"),
        port: 9092,
        rack: None,
    }
}

pub fn described(group_id: &str, error_code: i16) -> DescribedGroup {
    DescribedGroup {
        error_code,
        group_id: group_id.to_owned(),
        state: if error_code == 0 { "Stable".to_owned() } else { String::new() },
        protocol_type: "consumer".to_owned(),
        ..Default::default()
    }
}

pub fn describe_groups_response(groups: Vec<DescribedGroup>) -> DescribeGroupsResponse {
    DescribeGroupsResponse { groups }
}

#[async_trait]
impl BrokerGateway for FakeGateway {
    async fn cluster_metadata(&self) -> Result<ClusterMetadata, GatewayError> {
        if self.metadata_hangs {
            std::future::pending::<()>().await;
        }
        if let Some(error) = &self.metadata_error {
            return Err(error.clone());
        }

        Ok(ClusterMetadata {
            cluster_id: Some("fake-cluster".to_owned()),
            controller_id: self.controller_id,
            brokers: self.brokers.clone(),
        })
    }

    async fn find_coordinator(&self, key: &CoordinatorKey) -> Result<BrokerMetadata, GatewayError> {
        let coordinator = self
            .coordinator
            .ok_or_else(|| GatewayError::unreachable(format!("no coordinator for {key}")))?;
        Ok(broker(coordinator))
    }

    async fn send_to_broker(
        &self,
        broker_id: BrokerId,
        request: &AdminRequest,
    ) -> Result<AdminResponse, GatewayError> {
        self.sent.lock().unwrap().push((Some(broker_id), request.kind()));

        match self.behaviours.get(&broker_id).cloned() {
            Some(BrokerBehaviour::Respond(response)) => Ok(response),
            Some(BrokerBehaviour::Fail(error)) => Err(error),
            Some(BrokerBehaviour::Delay(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(BrokerBehaviour::Hang) => std::future::pending().await,
            Some(BrokerBehaviour::Panic) => panic!("broker {broker_id} crashed"),
            None => Err(GatewayError::unreachable(format!("broker {broker_id} is not scripted"))),
        }
    }

    async fn send(&self, request: &AdminRequest) -> Result<AdminResponse, GatewayError> {
        self.sent.lock().unwrap().push((None, request.kind()));

        self.routed
            .clone()
            .unwrap_or_else(|| Err(GatewayError::unreachable("no routed response scripted")))
    }
}
