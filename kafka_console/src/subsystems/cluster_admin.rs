use crate::subsystems::http_client::get_json;
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionBalancerStatus {
    pub status: String,
    pub unavailable_nodes: Vec<i32>,
    pub over_disk_limit_nodes: Vec<i32>,
    pub seconds_since_last_tick: i64,
    pub current_reassignments_count: i64,
}

#[async_trait]
pub trait ClusterAdminApi: Send + Sync {
    async fn cluster_version(&self) -> Result<String, anyhow::Error>;

    async fn list_users(&self) -> Result<Vec<String>, anyhow::Error>;

    async fn partition_balancer_status(&self) -> Result<PartitionBalancerStatus, anyhow::Error>;
}

pub struct HttpClusterAdminApi {
    client: reqwest::Client,
    urls: Vec<String>,
}

impl HttpClusterAdminApi {
    pub fn new(client: reqwest::Client, urls: Vec<String>) -> Result<Self, anyhow::Error> {
        if urls.is_empty() {
            bail!("Admin api is enabled but no urls are configured")
        }

        Ok(Self { client, urls })
    }
}

#[derive(Deserialize)]
struct AdminBroker {
    version: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct BalancerViolations {
    unavailable_nodes: Vec<i32>,
    over_disk_limit_nodes: Vec<i32>,
}

#[derive(Deserialize)]
struct BalancerStatusResource {
    status: String,
    #[serde(default)]
    violations: BalancerViolations,
    #[serde(default)]
    seconds_since_last_tick: i64,
    #[serde(default)]
    current_reassignments_count: i64,
}

#[async_trait]
impl ClusterAdminApi for HttpClusterAdminApi {
    async fn cluster_version(&self) -> Result<String, anyhow::Error> {
        let brokers: Vec<AdminBroker> = get_json(&self.client, &self.urls, "/v1/brokers")
            .await
            .context("While fetching brokers from admin api")?;

        brokers
            .into_iter()
            .filter_map(|b| b.version)
            .filter(|v| !v.is_empty())
            .min()
            .ok_or_else(|| anyhow!("No broker reported its version"))
    }

    async fn list_users(&self) -> Result<Vec<String>, anyhow::Error> {
        get_json(&self.client, &self.urls, "/v1/security/users")
            .await
            .context("While fetching users from admin api")
    }

    async fn partition_balancer_status(&self) -> Result<PartitionBalancerStatus, anyhow::Error> {
        let resource: BalancerStatusResource =
            get_json(&self.client, &self.urls, "/v1/cluster/partition_balancer/status")
                .await
                .context("While fetching partition balancer status")?;

        Ok(PartitionBalancerStatus {
            status: resource.status,
            unavailable_nodes: resource.violations.unavailable_nodes,
            over_disk_limit_nodes: resource.violations.over_disk_limit_nodes,
            seconds_since_last_tick: resource.seconds_since_last_tick,
            current_reassignments_count: resource.current_reassignments_count,
        })
    }
}
