use crate::subsystems::http_client::get_json;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectClusterTarget {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectClusterInfo {
    pub version: String,
    pub commit: Option<String>,
    pub kafka_cluster_id: Option<String>,
    pub installed_plugins: usize,
}

#[async_trait]
pub trait ConnectClusters: Send + Sync {
    fn clusters(&self) -> Vec<ConnectClusterTarget>;

    async fn cluster_info(
        &self,
        cluster: &ConnectClusterTarget,
    ) -> Result<ConnectClusterInfo, anyhow::Error>;
}

pub struct HttpConnectClusters {
    client: reqwest::Client,
    clusters: Vec<ConnectClusterTarget>,
}

impl HttpConnectClusters {
    pub fn new(client: reqwest::Client, clusters: Vec<ConnectClusterTarget>) -> Self {
        Self { client, clusters }
    }
}

#[derive(Deserialize)]
struct RootResource {
    version: String,
    commit: Option<String>,
    kafka_cluster_id: Option<String>,
}

#[async_trait]
impl ConnectClusters for HttpConnectClusters {
    fn clusters(&self) -> Vec<ConnectClusterTarget> {
        self.clusters.clone()
    }

    async fn cluster_info(
        &self,
        cluster: &ConnectClusterTarget,
    ) -> Result<ConnectClusterInfo, anyhow::Error> {
        let urls = std::slice::from_ref(&cluster.url);
        let (root, plugins) = tokio::try_join!(
            get_json::<RootResource>(&self.client, urls, "/"),
            get_json::<Vec<IgnoredAny>>(&self.client, urls, "/connector-plugins"),
        )
        .with_context(|| format!("While fetching info of connect cluster '{}'", cluster.name))?;

        Ok(ConnectClusterInfo {
            version: root.version,
            commit: root.commit,
            kafka_cluster_id: root.kafka_cluster_id,
            installed_plugins: plugins.len(),
        })
    }
}

pub struct ConnectClusterSubset {
    inner: Arc<dyn ConnectClusters>,
    clusters: Vec<ConnectClusterTarget>,
}

impl ConnectClusterSubset {
    pub fn new(inner: Arc<dyn ConnectClusters>, clusters: Vec<ConnectClusterTarget>) -> Self {
        Self { inner, clusters }
    }
}

#[async_trait]
impl ConnectClusters for ConnectClusterSubset {
    fn clusters(&self) -> Vec<ConnectClusterTarget> {
        self.clusters.clone()
    }

    async fn cluster_info(
        &self,
        cluster: &ConnectClusterTarget,
    ) -> Result<ConnectClusterInfo, anyhow::Error> {
        self.inner.cluster_info(cluster).await
    }
}
