use crate::error::error_for_code;
use crate::gateway::{BrokerGateway, DescribeLogDirsRequest, DescribeLogDirsResponse, GatewayError};
use crate::queries::get_overview::request::{GetOverviewQueryInternal, OverviewSources};
use crate::queries::get_overview::response::{
    BrokerLogDirs, BrokerOverview, ClusterAdminOverview, ConnectClusterDetails,
    ConnectClusterOverview, ConsoleOverview, EntryStatus, KafkaOverview, KafkaStorage, Overview,
    SchemaRegistryOverview, SubsystemStatus,
};
use crate::sharding::{dispatch_to_brokers, fan_out};
use crate::subsystems::{ClusterAdminApi, ConnectClusters, SchemaRegistry};
use anyhow::anyhow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Collects the status of every subsystem concurrently. Never fails: unconfigured subsystems
/// are reported as such and failing ones as unhealthy.
pub async fn get_overview(
    sources: &OverviewSources,
    query: GetOverviewQueryInternal,
    cancellation_token: &CancellationToken,
) -> Overview {
    let deadline = OverviewDeadline::start(cancellation_token, query.timeout);

    let (kafka, cluster_admin, kafka_connect, schema_registry) = tokio::join!(
        kafka_overview(&sources.gateway, &deadline),
        cluster_admin_overview(sources.cluster_admin.as_ref(), &deadline),
        connect_overview(sources.kafka_connect.as_ref(), &deadline),
        schema_registry_overview(sources.schema_registry.as_ref(), &deadline),
    );

    Overview {
        kafka,
        cluster_admin,
        console: console_overview(sources),
        kafka_connect,
        schema_registry,
    }
}

struct OverviewDeadline {
    parent: CancellationToken,
    token: CancellationToken,
    timeout: Duration,
    _guard: tokio_util::sync::DropGuard,
}

impl OverviewDeadline {
    fn start(parent: &CancellationToken, timeout: Duration) -> Self {
        let token = parent.child_token();
        let timer_token = token.clone();
        tokio::spawn(async move {
            select! {
                _ = timer_token.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    debug!("Overview deadline of {timeout:?} elapsed");
                    timer_token.cancel();
                }
            }
        });

        Self {
            parent: parent.clone(),
            _guard: token.clone().drop_guard(),
            token,
            timeout,
        }
    }

    fn reason(&self) -> String {
        if self.parent.is_cancelled() {
            "Overview request was cancelled".to_owned()
        } else {
            format!("No answer within {:?}", self.timeout)
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, anyhow::Error>>,
    ) -> Result<T, anyhow::Error> {
        select! {
            biased;
            _ = self.token.cancelled() => Err(anyhow!(self.reason())),
            result = call => result,
        }
    }
}

const STORAGE_UNSUPPORTED_NOTE: &str =
    "Log dir sizes can't be requested through the configured Kafka client";

async fn kafka_overview(
    gateway: &Arc<dyn BrokerGateway>,
    deadline: &OverviewDeadline,
) -> SubsystemStatus<KafkaOverview> {
    let metadata = select! {
        biased;
        _ = deadline.token.cancelled() => Err(GatewayError::Cancelled),
        metadata = gateway.cluster_metadata() => metadata,
    };
    let metadata = match metadata {
        Ok(metadata) => metadata,
        Err(GatewayError::Cancelled) => return unhealthy("kafka", deadline.reason()),
        Err(e) => return unhealthy("kafka", format!("Could not fetch cluster metadata: {e}")),
    };

    let outcomes = dispatch_to_brokers(
        gateway,
        DescribeLogDirsRequest { topics: None },
        metadata.brokers,
        &deadline.token,
    )
    .await;

    let mut total_used_bytes = 0;
    let mut reporting_brokers = 0;
    let mut unsupported = false;
    let mut brokers = outcomes
        .into_iter()
        .map(|outcome| {
            let log_dirs = match outcome.result.map(broker_log_dirs) {
                Ok(Ok(log_dirs)) => {
                    total_used_bytes += log_dirs.used_bytes;
                    reporting_brokers += 1;
                    EntryStatus::Healthy(log_dirs)
                }
                Ok(Err(reason)) => EntryStatus::Unhealthy { reason },
                Err(GatewayError::Cancelled) => EntryStatus::Unhealthy {
                    reason: deadline.reason(),
                },
                Err(e) => {
                    unsupported |= matches!(e, GatewayError::Unsupported { .. });
                    EntryStatus::Unhealthy {
                        reason: format!("Could not describe log dirs: {e}"),
                    }
                }
            };
            let broker = outcome.broker;
            BrokerOverview {
                is_controller: metadata.controller_id == Some(broker.node_id),
                broker_id: broker.node_id,
                host: broker.host,
                port: broker.port,
                rack: broker.rack,
                log_dirs,
            }
        })
        .collect::<Vec<_>>();
    brokers.sort_by_key(|broker| broker.broker_id);

    let storage = (reporting_brokers > 0).then_some(KafkaStorage {
        total_used_bytes,
        reporting_brokers,
    });
    let storage_note = match (&storage, unsupported) {
        (Some(_), _) => None,
        (None, true) => Some(STORAGE_UNSUPPORTED_NOTE.to_owned()),
        (None, false) if brokers.is_empty() => None,
        (None, false) => Some("No broker reported its log dirs".to_owned()),
    };

    SubsystemStatus::Healthy(KafkaOverview {
        cluster_id: metadata.cluster_id,
        controller_id: metadata.controller_id,
        brokers,
        storage,
        storage_note,
    })
}

fn broker_log_dirs(response: DescribeLogDirsResponse) -> Result<BrokerLogDirs, String> {
    if let Some(error) = error_for_code(response.error_code) {
        return Err(format!("Broker refused to describe log dirs: {error}"));
    }

    let healthy_dirs = response
        .dirs
        .iter()
        .filter(|dir| dir.error_code == 0)
        .collect::<Vec<_>>();
    let used_bytes = healthy_dirs
        .iter()
        .flat_map(|dir| &dir.topics)
        .flat_map(|topic| &topic.partitions)
        .filter(|partition| !partition.is_future)
        .map(|partition| partition.size_bytes)
        .sum();

    Ok(BrokerLogDirs {
        log_dir_count: healthy_dirs.len(),
        used_bytes,
    })
}

async fn cluster_admin_overview(
    cluster_admin: Option<&Arc<dyn ClusterAdminApi>>,
    deadline: &OverviewDeadline,
) -> SubsystemStatus<ClusterAdminOverview> {
    let Some(cluster_admin) = cluster_admin else {
        return SubsystemStatus::NotConfigured;
    };

    let (version, users, balancer) = tokio::join!(
        deadline.bounded(cluster_admin.cluster_version()),
        deadline.bounded(cluster_admin.list_users()),
        deadline.bounded(cluster_admin.partition_balancer_status()),
    );

    let version = match version {
        Ok(version) => version,
        Err(e) => {
            return unhealthy(
                "cluster_admin",
                format!("Could not fetch cluster version from admin api: {e:#}"),
            )
        }
    };

    let user_count = users
        .inspect_err(|e| warn!(subsystem = "cluster_admin", "Failed to list users via admin api: {e:#}"))
        .ok()
        .map(|users| users.len());
    let partition_balancer_status = balancer
        .inspect_err(|e| {
            warn!(subsystem = "cluster_admin", "Failed to retrieve partition balancer status: {e:#}")
        })
        .ok();

    SubsystemStatus::Healthy(ClusterAdminOverview {
        version,
        user_count,
        partition_balancer_status,
    })
}

async fn schema_registry_overview(
    schema_registry: Option<&Arc<dyn SchemaRegistry>>,
    deadline: &OverviewDeadline,
) -> SubsystemStatus<SchemaRegistryOverview> {
    let Some(schema_registry) = schema_registry else {
        return SubsystemStatus::NotConfigured;
    };

    match deadline.bounded(schema_registry.subjects()).await {
        Ok(subjects) => SubsystemStatus::Healthy(SchemaRegistryOverview {
            registered_subjects: subjects.len(),
        }),
        Err(e) => unhealthy(
            "schema_registry",
            format!("Could not fetch subjects from schema registry: {e:#}"),
        ),
    }
}

async fn connect_overview(
    kafka_connect: Option<&Arc<dyn ConnectClusters>>,
    deadline: &OverviewDeadline,
) -> SubsystemStatus<Vec<ConnectClusterOverview>> {
    let Some(kafka_connect) = kafka_connect else {
        return SubsystemStatus::NotConfigured;
    };

    let clusters = kafka_connect.clusters();
    let results = fan_out(clusters.clone(), &deadline.token, |cluster| {
        let kafka_connect = kafka_connect.clone();
        async move { kafka_connect.cluster_info(&cluster).await }
    })
    .await;

    let mut overviews = results
        .into_iter()
        .map(|(cluster, result)| {
            let status = match result {
                Ok(info) => EntryStatus::Healthy(ConnectClusterDetails {
                    version: info.version,
                    commit: info.commit,
                    kafka_cluster_id: info.kafka_cluster_id,
                    installed_plugins: info.installed_plugins,
                }),
                Err(e) => {
                    let reason = match e.downcast_ref::<GatewayError>() {
                        Some(GatewayError::Cancelled) => deadline.reason(),
                        _ => format!("{e:#}"),
                    };
                    warn!(subsystem = "kafka_connect", cluster = %cluster.name, "Connect cluster is unhealthy: {reason}");
                    EntryStatus::Unhealthy { reason }
                }
            };
            ConnectClusterOverview {
                name: cluster.name,
                host: cluster.url,
                status,
            }
        })
        .collect::<Vec<_>>();

    // Keep the configured order, workers report in arrival order.
    overviews.sort_by_key(|overview| {
        clusters
            .iter()
            .position(|cluster| cluster.name == overview.name)
            .unwrap_or(usize::MAX)
    });

    SubsystemStatus::Healthy(overviews)
}

fn console_overview(sources: &OverviewSources) -> ConsoleOverview {
    ConsoleOverview {
        version: sources.console_info.version.clone(),
        built_at: sources.console_info.built_at.clone(),
        license: sources.console_hooks.console_license_information(),
        enabled_features: sources.console_hooks.enabled_features(),
    }
}

fn unhealthy<T>(subsystem: &'static str, reason: String) -> SubsystemStatus<T> {
    warn!(subsystem, "Subsystem is unhealthy: {reason}");
    SubsystemStatus::Unhealthy { reason }
}
