use crate::console_info::ConsoleInfo;
use crate::error::ConsoleError;
use crate::gateway::BrokerGateway;
use crate::hooks::{AuthorizationHooks, ConsoleHooks};
use crate::subsystems::{ClusterAdminApi, ConnectClusterSubset, ConnectClusters, SchemaRegistry};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct OverviewSources {
    pub gateway: Arc<dyn BrokerGateway>,
    pub cluster_admin: Option<Arc<dyn ClusterAdminApi>>,
    pub schema_registry: Option<Arc<dyn SchemaRegistry>>,
    pub kafka_connect: Option<Arc<dyn ConnectClusters>>,
    pub console_info: ConsoleInfo,
    pub console_hooks: Arc<dyn ConsoleHooks>,
}

impl OverviewSources {
    /// Narrows the sources down to what `hooks` lets the caller see. Hidden subsystems are
    /// not queried at all and show up as not configured.
    pub async fn visible_to(&self, hooks: &dyn AuthorizationHooks) -> Result<Self, ConsoleError> {
        let schema_registry = match &self.schema_registry {
            Some(registry) if hooks.can_view_schemas().await? => Some(registry.clone()),
            _ => None,
        };

        let kafka_connect = match &self.kafka_connect {
            Some(kafka_connect) => {
                let mut visible = vec![];
                for cluster in kafka_connect.clusters() {
                    if hooks.can_view_connect_cluster(&cluster.name).await? {
                        visible.push(cluster);
                    }
                }
                let subset: Arc<dyn ConnectClusters> =
                    Arc::new(ConnectClusterSubset::new(kafka_connect.clone(), visible));
                Some(subset)
            }
            None => None,
        };

        Ok(Self {
            schema_registry,
            kafka_connect,
            ..self.clone()
        })
    }
}

#[derive(Debug)]
pub struct GetOverviewQueryInternal {
    pub timeout: Duration,
}
