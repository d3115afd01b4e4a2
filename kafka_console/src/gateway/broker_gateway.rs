use crate::gateway::{AdminRequest, AdminResponse, GatewayError};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};

pub type BrokerId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrokerMetadata {
    pub node_id: BrokerId,
    pub host: String,
    pub port: u16,
    pub rack: Option<String>,
}

impl BrokerMetadata {
    pub fn unknown(node_id: BrokerId) -> Self {
        Self {
            node_id,
            host: String::new(),
            port: 0,
            rack: None,
        }
    }
}

impl Display for BrokerMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.node_id, self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct ClusterMetadata {
    pub cluster_id: Option<String>,
    pub controller_id: Option<BrokerId>,
    pub brokers: Vec<BrokerMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoordinatorKey {
    Group(String),
}

impl Display for CoordinatorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinatorKey::Group(group) => write!(f, "group '{group}'"),
        }
    }
}

/// Issues administrative requests against the brokers of one cluster. Retries, if any,
/// happen here and never in the callers.
#[async_trait]
pub trait BrokerGateway: Send + Sync {
    async fn cluster_metadata(&self) -> Result<ClusterMetadata, GatewayError>;

    async fn find_coordinator(&self, key: &CoordinatorKey) -> Result<BrokerMetadata, GatewayError>;

    async fn send_to_broker(
        &self,
        broker_id: BrokerId,
        request: &AdminRequest,
    ) -> Result<AdminResponse, GatewayError>;

    async fn send(&self, request: &AdminRequest) -> Result<AdminResponse, GatewayError>;
}
