mod common;

use async_trait::async_trait;
use chrono::Utc;
use common::{BrokerBehaviour, FakeGateway};
use kafka_console::console_info::{ConsoleInfo, License, LicenseSource, LicenseType};
use kafka_console::gateway::{
    BrokerGateway, DescribeLogDirsResponse, GatewayError, LogDir, LogDirPartition, LogDirTopic,
    RequestKind,
};
use kafka_console::error::ConsoleError;
use kafka_console::hooks::{AuthorizationHooks, OpenSourceHooks};
use kafka_console::queries::get_overview::{
    get_overview, EntryStatus, GetOverviewQueryInternal, OverviewSources, SubsystemStatus,
};
use kafka_console::subsystems::{
    ClusterAdminApi, ConnectClusterInfo, ConnectClusterTarget, ConnectClusters,
    PartitionBalancerStatus, SchemaRegistry,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

struct StaticSchemaRegistry {
    subjects: Result<Vec<String>, String>,
    delay: Duration,
}

#[async_trait]
impl SchemaRegistry for StaticSchemaRegistry {
    async fn subjects(&self) -> Result<Vec<String>, anyhow::Error> {
        tokio::time::sleep(self.delay).await;
        self.subjects.clone().map_err(anyhow::Error::msg)
    }
}

struct StaticConnectClusters {
    clusters: Vec<(ConnectClusterTarget, Result<ConnectClusterInfo, String>)>,
}

#[async_trait]
impl ConnectClusters for StaticConnectClusters {
    fn clusters(&self) -> Vec<ConnectClusterTarget> {
        self.clusters.iter().map(|(target, _)| target.clone()).collect()
    }

    async fn cluster_info(&self, cluster: &ConnectClusterTarget) -> Result<ConnectClusterInfo, anyhow::Error> {
        let (_, info) = self
            .clusters
            .iter()
            .find(|(target, _)| target == cluster)
            .ok_or_else(|| anyhow::anyhow!("unknown cluster"))?;
        info.clone().map_err(anyhow::Error::msg)
    }
}

/// Remembers which clusters were asked for their info.
struct RecordingConnectClusters {
    inner: StaticConnectClusters,
    asked: Mutex<Vec<String>>,
}

#[async_trait]
impl ConnectClusters for RecordingConnectClusters {
    fn clusters(&self) -> Vec<ConnectClusterTarget> {
        self.inner.clusters()
    }

    async fn cluster_info(&self, cluster: &ConnectClusterTarget) -> Result<ConnectClusterInfo, anyhow::Error> {
        self.asked.lock().unwrap().push(cluster.name.clone());
        self.inner.cluster_info(cluster).await
    }
}

/// Hides schemas and the connect cluster named `restricted`.
struct RestrictedHooks;

#[async_trait]
impl AuthorizationHooks for RestrictedHooks {
    async fn can_delete_topic(&self, _topic_name: &str) -> Result<bool, ConsoleError> {
        Ok(false)
    }

    async fn can_delete_topic_records(&self, _topic_name: &str) -> Result<bool, ConsoleError> {
        Ok(false)
    }

    async fn can_see_consumer_group(&self, _group_id: &str) -> Result<bool, ConsoleError> {
        Ok(true)
    }

    async fn can_view_connect_cluster(&self, cluster_name: &str) -> Result<bool, ConsoleError> {
        Ok(cluster_name != "restricted")
    }

    async fn can_view_schemas(&self) -> Result<bool, ConsoleError> {
        Ok(false)
    }
}

struct StaticClusterAdmin {
    version: Result<String, String>,
    users: Result<Vec<String>, String>,
}

#[async_trait]
impl ClusterAdminApi for StaticClusterAdmin {
    async fn cluster_version(&self) -> Result<String, anyhow::Error> {
        self.version.clone().map_err(anyhow::Error::msg)
    }

    async fn list_users(&self) -> Result<Vec<String>, anyhow::Error> {
        self.users.clone().map_err(anyhow::Error::msg)
    }

    async fn partition_balancer_status(&self) -> Result<PartitionBalancerStatus, anyhow::Error> {
        Ok(PartitionBalancerStatus {
            status: "ready".to_owned(),
            unavailable_nodes: vec![],
            over_disk_limit_nodes: vec![],
            seconds_since_last_tick: 3,
            current_reassignments_count: 0,
        })
    }
}

fn log_dirs(sizes: &[i64]) -> DescribeLogDirsResponse {
    DescribeLogDirsResponse {
        error_code: 0,
        dirs: vec![LogDir {
            error_code: 0,
            dir: "/var/lib/kafka".to_owned(),
            topics: vec![LogDirTopic {
                topic: "orders".to_owned(),
                partitions: sizes
                    .iter()
                    .enumerate()
                    .map(|(partition, size)| LogDirPartition {
                        partition: partition as i32,
                        size_bytes: *size,
                        is_future: false,
                    })
                    .collect(),
            }],
        }],
    }
}

fn connect_target(name: &str) -> ConnectClusterTarget {
    ConnectClusterTarget {
        name: name.to_owned(),
        url: format!("http://{name}:8083"),
    }
}

fn connect_info(version: &str, installed_plugins: usize) -> ConnectClusterInfo {
    ConnectClusterInfo {
        version: version.to_owned(),
        commit: None,
        kafka_cluster_id: None,
        installed_plugins,
    }
}

fn sources(gateway: Arc<dyn BrokerGateway>) -> OverviewSources {
    OverviewSources {
        gateway,
        cluster_admin: None,
        schema_registry: None,
        kafka_connect: None,
        console_info: ConsoleInfo {
            version: "v2.4.0".to_owned(),
            built_at: "2024-01-01T00:00:00Z".to_owned(),
        },
        console_hooks: Arc::new(OpenSourceHooks::new(License::open_source(LicenseSource::Console, Utc::now()))),
    }
}

fn healthy_gateway() -> Arc<dyn BrokerGateway> {
    FakeGateway::with_brokers(&[1, 2])
        .respond(1, log_dirs(&[100, 50]))
        .respond(2, log_dirs(&[25]))
        .shared()
}

fn query() -> GetOverviewQueryInternal {
    GetOverviewQueryInternal {
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn unconfigured_schema_registry_leaves_the_rest_populated() {
    let mut sources = sources(healthy_gateway());
    sources.cluster_admin = Some(Arc::new(StaticClusterAdmin {
        version: Ok("v23.3.1".to_owned()),
        users: Ok(vec!["admin".to_owned(), "console".to_owned()]),
    }));
    sources.kafka_connect = Some(Arc::new(StaticConnectClusters {
        clusters: vec![(connect_target("main"), Ok(connect_info("3.6.0", 12)))],
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    assert_eq!(overview.schema_registry, SubsystemStatus::NotConfigured);

    let kafka = overview.kafka.healthy().unwrap();
    assert_eq!(kafka.brokers.len(), 2);
    assert_eq!(kafka.storage.as_ref().unwrap().total_used_bytes, 175);
    assert_eq!(kafka.storage_note, None);
    assert!(kafka.brokers[0].is_controller);

    let cluster_admin = overview.cluster_admin.healthy().unwrap();
    assert_eq!(cluster_admin.version, "v23.3.1");
    assert_eq!(cluster_admin.user_count, Some(2));
    assert!(cluster_admin.partition_balancer_status.is_some());

    let connect = overview.kafka_connect.healthy().unwrap();
    assert_eq!(connect.len(), 1);
    assert_eq!(connect[0].status.healthy().unwrap().installed_plugins, 12);

    assert_eq!(overview.console.version, "v2.4.0");
    assert_eq!(overview.console.license.license_type, LicenseType::OpenSource);
}

#[tokio::test]
async fn one_unreachable_connect_cluster_keeps_the_others() {
    let mut sources = sources(healthy_gateway());
    sources.kafka_connect = Some(Arc::new(StaticConnectClusters {
        clusters: vec![
            (connect_target("first"), Ok(connect_info("3.6.0", 4))),
            (connect_target("second"), Err("connection refused".to_owned())),
            (connect_target("third"), Ok(connect_info("3.5.1", 7))),
        ],
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    let clusters = overview.kafka_connect.healthy().unwrap();
    let names = clusters.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(clusters[0].status.healthy().unwrap().version, "3.6.0");
    assert!(clusters[1].status.unhealthy_reason().unwrap().contains("connection refused"));
    assert_eq!(clusters[2].status.healthy().unwrap().installed_plugins, 7);
}

#[tokio::test]
async fn failing_schema_registry_is_unhealthy_not_an_error() {
    let mut sources = sources(healthy_gateway());
    sources.schema_registry = Some(Arc::new(StaticSchemaRegistry {
        subjects: Err("401 Unauthorized".to_owned()),
        delay: Duration::ZERO,
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    let reason = overview.schema_registry.unhealthy_reason().unwrap();
    assert!(reason.starts_with("Could not fetch subjects from schema registry"));
    assert!(reason.contains("401 Unauthorized"));
    assert!(overview.kafka.healthy().is_some());
}

#[tokio::test]
async fn registered_subjects_are_counted() {
    let mut sources = sources(healthy_gateway());
    sources.schema_registry = Some(Arc::new(StaticSchemaRegistry {
        subjects: Ok(vec!["orders-value".to_owned(), "orders-key".to_owned()]),
        delay: Duration::ZERO,
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    assert_eq!(overview.schema_registry.healthy().unwrap().registered_subjects, 2);
}

#[tokio::test(start_paused = true)]
async fn slow_subsystem_is_cut_off_by_the_deadline() {
    let mut sources = sources(healthy_gateway());
    sources.schema_registry = Some(Arc::new(StaticSchemaRegistry {
        subjects: Ok(vec![]),
        delay: Duration::from_secs(60),
    }));
    let query = GetOverviewQueryInternal {
        timeout: Duration::from_secs(2),
    };

    let overview = get_overview(&sources, query, &CancellationToken::new()).await;

    let reason = overview.schema_registry.unhealthy_reason().unwrap();
    assert!(reason.contains("No answer within 2s"), "{reason}");
    assert!(overview.kafka.healthy().is_some());
}

#[tokio::test]
async fn cluster_admin_without_version_is_unhealthy() {
    let mut sources = sources(healthy_gateway());
    sources.cluster_admin = Some(Arc::new(StaticClusterAdmin {
        version: Err("admin api down".to_owned()),
        users: Ok(vec![]),
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    assert!(overview.cluster_admin.unhealthy_reason().unwrap().contains("admin api down"));
}

#[tokio::test]
async fn cluster_admin_optional_parts_are_left_empty_on_failure() {
    let mut sources = sources(healthy_gateway());
    sources.cluster_admin = Some(Arc::new(StaticClusterAdmin {
        version: Ok("v23.3.1".to_owned()),
        users: Err("forbidden".to_owned()),
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    let cluster_admin = overview.cluster_admin.healthy().unwrap();
    assert_eq!(cluster_admin.user_count, None);
    assert!(cluster_admin.partition_balancer_status.is_some());
}

#[tokio::test]
async fn broker_without_log_dirs_is_listed_as_unhealthy() {
    let gateway = FakeGateway::with_brokers(&[1, 2, 3])
        .respond(1, log_dirs(&[10]))
        .fail(2, GatewayError::unreachable("refused"))
        .respond(3, log_dirs(&[5, 5]))
        .shared();

    let overview = get_overview(&sources(gateway), query(), &CancellationToken::new()).await;

    let kafka = overview.kafka.healthy().unwrap();
    let broker_ids = kafka.brokers.iter().map(|b| b.broker_id).collect::<Vec<_>>();
    assert_eq!(broker_ids, vec![1, 2, 3]);
    assert!(matches!(kafka.brokers[1].log_dirs, EntryStatus::Unhealthy { .. }));
    let storage = kafka.storage.as_ref().unwrap();
    assert_eq!(storage.total_used_bytes, 20);
    assert_eq!(storage.reporting_brokers, 2);
}

#[tokio::test]
async fn unreachable_cluster_is_unhealthy() {
    let gateway = FakeGateway::with_brokers(&[1])
        .metadata_error(GatewayError::unreachable("no bootstrap server answered"))
        .shared();

    let overview = get_overview(&sources(gateway), query(), &CancellationToken::new()).await;

    assert!(overview
        .kafka
        .unhealthy_reason()
        .unwrap()
        .contains("no bootstrap server answered"));
    assert_eq!(overview.console.built_at, "2024-01-01T00:00:00Z");
}

#[tokio::test]
async fn cancelled_request_marks_pending_subsystems() {
    let gateway = FakeGateway::with_brokers(&[1]).behave(1, BrokerBehaviour::Hang).shared();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let overview = get_overview(&sources(gateway), query(), &token).await;

    let kafka = overview.kafka.healthy().unwrap();
    assert_eq!(
        kafka.brokers[0].log_dirs.unhealthy_reason(),
        Some("Overview request was cancelled")
    );
    assert!(kafka.storage.is_none());
    assert_eq!(kafka.storage_note.as_deref(), Some("No broker reported its log dirs"));
}

#[tokio::test]
async fn unsupported_log_dirs_explain_missing_storage() {
    let unsupported = GatewayError::Unsupported {
        kind: RequestKind::DescribeLogDirs,
    };
    let gateway = FakeGateway::with_brokers(&[1, 2])
        .fail(1, unsupported.clone())
        .fail(2, unsupported)
        .shared();

    let overview = get_overview(&sources(gateway), query(), &CancellationToken::new()).await;

    let kafka = overview.kafka.healthy().unwrap();
    assert_eq!(kafka.brokers.len(), 2);
    assert!(kafka.storage.is_none());
    assert_eq!(
        kafka.storage_note.as_deref(),
        Some("Log dir sizes can't be requested through the configured Kafka client")
    );
}

#[tokio::test]
async fn overview_serializes_tagged_statuses() {
    let overview = get_overview(&sources(healthy_gateway()), query(), &CancellationToken::new()).await;

    let json = serde_json::to_value(&overview).unwrap();

    assert_eq!(json["schemaRegistry"]["status"], "notConfigured");
    assert_eq!(json["kafka"]["status"], "healthy");
    assert_eq!(json["kafka"]["details"]["storage"]["totalUsedBytes"], 175);
    assert_eq!(json["console"]["license"]["type"], "open_source");
}

#[tokio::test]
async fn hidden_subsystems_are_neither_queried_nor_reported() {
    let connect = Arc::new(RecordingConnectClusters {
        inner: StaticConnectClusters {
            clusters: vec![
                (connect_target("public"), Ok(connect_info("3.6.0", 4))),
                (connect_target("restricted"), Ok(connect_info("3.6.0", 9))),
            ],
        },
        asked: Mutex::new(vec![]),
    });
    let mut sources = sources(healthy_gateway());
    sources.kafka_connect = Some(connect.clone() as Arc<dyn ConnectClusters>);
    sources.schema_registry = Some(Arc::new(StaticSchemaRegistry {
        subjects: Ok(vec!["orders-value".to_owned()]),
        delay: Duration::ZERO,
    }));

    let visible = sources.visible_to(&RestrictedHooks).await.unwrap();
    let overview = get_overview(&visible, query(), &CancellationToken::new()).await;

    assert_eq!(overview.schema_registry, SubsystemStatus::NotConfigured);
    let clusters = overview.kafka_connect.healthy().unwrap();
    let names = clusters.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["public"]);
    assert_eq!(*connect.asked.lock().unwrap(), vec!["public".to_owned()]);
    assert!(overview.kafka.healthy().is_some());
}

#[tokio::test]
async fn open_source_hooks_hide_nothing() {
    let mut sources = sources(healthy_gateway());
    sources.kafka_connect = Some(Arc::new(StaticConnectClusters {
        clusters: vec![(connect_target("main"), Ok(connect_info("3.6.0", 1)))],
    }));
    sources.schema_registry = Some(Arc::new(StaticSchemaRegistry {
        subjects: Ok(vec![]),
        delay: Duration::ZERO,
    }));
    let hooks = OpenSourceHooks::new(License::open_source(LicenseSource::Console, Utc::now()));

    let visible = sources.visible_to(&hooks).await.unwrap();
    let overview = get_overview(&visible, query(), &CancellationToken::new()).await;

    assert!(overview.schema_registry.healthy().is_some());
    assert_eq!(overview.kafka_connect.healthy().unwrap().len(), 1);
}

#[tokio::test]
async fn connect_build_details_are_reported() {
    let mut sources = sources(healthy_gateway());
    sources.kafka_connect = Some(Arc::new(StaticConnectClusters {
        clusters: vec![(
            connect_target("main"),
            Ok(ConnectClusterInfo {
                version: "3.6.0".to_owned(),
                commit: Some("60e845626d8a465a".to_owned()),
                kafka_cluster_id: Some("fake-cluster".to_owned()),
                installed_plugins: 3,
            }),
        )],
    }));

    let overview = get_overview(&sources, query(), &CancellationToken::new()).await;

    let details = overview.kafka_connect.healthy().unwrap()[0].status.healthy().unwrap().clone();
    assert_eq!(details.commit.as_deref(), Some("60e845626d8a465a"));
    assert_eq!(details.kafka_cluster_id.as_deref(), Some("fake-cluster"));
}
