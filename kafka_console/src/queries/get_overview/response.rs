use crate::console_info::License;
use crate::gateway::BrokerId;
use crate::subsystems::PartitionBalancerStatus;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "details", rename_all = "camelCase")]
pub enum SubsystemStatus<T> {
    NotConfigured,
    Healthy(T),
    Unhealthy { reason: String },
}

impl<T> SubsystemStatus<T> {
    pub fn is_configured(&self) -> bool {
        !matches!(self, SubsystemStatus::NotConfigured)
    }

    pub fn healthy(&self) -> Option<&T> {
        match self {
            SubsystemStatus::Healthy(value) => Some(value),
            _ => None,
        }
    }

    pub fn unhealthy_reason(&self) -> Option<&str> {
        match self {
            SubsystemStatus::Unhealthy { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "details", rename_all = "camelCase")]
pub enum EntryStatus<T> {
    Healthy(T),
    Unhealthy { reason: String },
}

impl<T> EntryStatus<T> {
    pub fn healthy(&self) -> Option<&T> {
        match self {
            EntryStatus::Healthy(value) => Some(value),
            EntryStatus::Unhealthy { .. } => None,
        }
    }

    pub fn unhealthy_reason(&self) -> Option<&str> {
        match self {
            EntryStatus::Healthy(_) => None,
            EntryStatus::Unhealthy { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub kafka: SubsystemStatus<KafkaOverview>,
    pub cluster_admin: SubsystemStatus<ClusterAdminOverview>,
    pub console: ConsoleOverview,
    pub kafka_connect: SubsystemStatus<Vec<ConnectClusterOverview>>,
    pub schema_registry: SubsystemStatus<SchemaRegistryOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaOverview {
    pub cluster_id: Option<String>,
    pub controller_id: Option<BrokerId>,
    pub brokers: Vec<BrokerOverview>,
    /// Only brokers that reported their log dirs are counted; `None` if none did.
    pub storage: Option<KafkaStorage>,
    pub storage_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerOverview {
    pub broker_id: BrokerId,
    pub host: String,
    pub port: u16,
    pub rack: Option<String>,
    pub is_controller: bool,
    pub log_dirs: EntryStatus<BrokerLogDirs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerLogDirs {
    pub log_dir_count: usize,
    pub used_bytes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaStorage {
    pub total_used_bytes: i64,
    pub reporting_brokers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAdminOverview {
    pub version: String,
    pub user_count: Option<usize>,
    pub partition_balancer_status: Option<PartitionBalancerStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleOverview {
    pub version: String,
    pub built_at: String,
    pub license: License,
    pub enabled_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectClusterOverview {
    pub name: String,
    pub host: String,
    pub status: EntryStatus<ConnectClusterDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectClusterDetails {
    pub version: String,
    pub commit: Option<String>,
    pub kafka_cluster_id: Option<String>,
    pub installed_plugins: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRegistryOverview {
    pub registered_subjects: usize,
}
