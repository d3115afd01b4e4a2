use crate::api::console_service::proto::{
    broker_overview_dto, cluster_admin_status_dto, connect_cluster_overview_dto,
    kafka_connect_status_dto, kafka_status_dto, schema_registry_status_dto, BrokerLogDirsDto,
    BrokerOverviewDto, ClusterAdminOverviewDto, ClusterAdminStatusDto, ConnectClusterDetailsDto,
    ConnectClusterOverviewDto, ConnectClustersDto, ConsoleOverviewDto, GetOverviewQueryResponse,
    KafkaConnectStatusDto, KafkaOverviewDto, KafkaStatusDto, KafkaStorageDto, LicenseDto,
    NotConfiguredDto, PartitionBalancerStatusDto, SchemaRegistryOverviewDto,
    SchemaRegistryStatusDto,
};
use crate::api::converters::shared::unhealthy_to_proto;
use crate::time_util::epoch_seconds_to_proto_timestamp;
use kafka_console::console_info::{License, LicenseSource, LicenseType};
use kafka_console::queries::get_overview::{
    BrokerOverview, ClusterAdminOverview, ConnectClusterOverview, ConsoleOverview, EntryStatus,
    KafkaOverview, Overview, SchemaRegistryOverview, SubsystemStatus,
};
use kafka_console::subsystems::PartitionBalancerStatus;
use rayon::prelude::*;

pub fn overview_to_proto_response(model: Overview) -> GetOverviewQueryResponse {
    GetOverviewQueryResponse {
        kafka: Some(kafka_status_to_proto(model.kafka)),
        cluster_admin: Some(cluster_admin_status_to_proto(model.cluster_admin)),
        console: Some(console_overview_to_proto(model.console)),
        kafka_connect: Some(connect_status_to_proto(model.kafka_connect)),
        schema_registry: Some(schema_registry_status_to_proto(model.schema_registry)),
    }
}

fn kafka_status_to_proto(model: SubsystemStatus<KafkaOverview>) -> KafkaStatusDto {
    let status = match model {
        SubsystemStatus::NotConfigured => kafka_status_dto::Status::NotConfigured(NotConfiguredDto {}),
        SubsystemStatus::Healthy(kafka) => kafka_status_dto::Status::Healthy(KafkaOverviewDto {
            cluster_id: kafka.cluster_id,
            controller_id: kafka.controller_id,
            brokers: kafka.brokers.into_par_iter().map(broker_overview_to_proto).collect(),
            storage: kafka.storage.map(|storage| KafkaStorageDto {
                total_used_bytes: storage.total_used_bytes,
                reporting_brokers: storage.reporting_brokers as u32,
            }),
            storage_note: kafka.storage_note,
        }),
        SubsystemStatus::Unhealthy { reason } => kafka_status_dto::Status::Unhealthy(unhealthy_to_proto(reason)),
    };

    KafkaStatusDto {
        status: Some(status),
    }
}

fn broker_overview_to_proto(model: BrokerOverview) -> BrokerOverviewDto {
    let log_dirs = match model.log_dirs {
        EntryStatus::Healthy(log_dirs) => broker_overview_dto::LogDirs::Healthy(BrokerLogDirsDto {
            log_dir_count: log_dirs.log_dir_count as u32,
            used_bytes: log_dirs.used_bytes,
        }),
        EntryStatus::Unhealthy { reason } => broker_overview_dto::LogDirs::Unhealthy(unhealthy_to_proto(reason)),
    };

    BrokerOverviewDto {
        broker_id: model.broker_id,
        host: model.host,
        port: model.port as u32,
        rack: model.rack,
        is_controller: model.is_controller,
        log_dirs: Some(log_dirs),
    }
}

fn cluster_admin_status_to_proto(model: SubsystemStatus<ClusterAdminOverview>) -> ClusterAdminStatusDto {
    let status = match model {
        SubsystemStatus::NotConfigured => {
            cluster_admin_status_dto::Status::NotConfigured(NotConfiguredDto {})
        }
        SubsystemStatus::Healthy(overview) => {
            cluster_admin_status_dto::Status::Healthy(ClusterAdminOverviewDto {
                version: overview.version,
                user_count: overview.user_count.map(|count| count as u32),
                partition_balancer_status: overview
                    .partition_balancer_status
                    .map(partition_balancer_status_to_proto),
            })
        }
        SubsystemStatus::Unhealthy { reason } => {
            cluster_admin_status_dto::Status::Unhealthy(unhealthy_to_proto(reason))
        }
    };

    ClusterAdminStatusDto {
        status: Some(status),
    }
}

fn partition_balancer_status_to_proto(model: PartitionBalancerStatus) -> PartitionBalancerStatusDto {
    PartitionBalancerStatusDto {
        status: model.status,
        unavailable_nodes: model.unavailable_nodes,
        over_disk_limit_nodes: model.over_disk_limit_nodes,
        seconds_since_last_tick: model.seconds_since_last_tick,
        current_reassignments_count: model.current_reassignments_count,
    }
}

fn console_overview_to_proto(model: ConsoleOverview) -> ConsoleOverviewDto {
    ConsoleOverviewDto {
        version: model.version,
        built_at: model.built_at,
        license: Some(license_to_proto(model.license)),
        enabled_features: model.enabled_features,
    }
}

pub fn license_to_proto(model: License) -> LicenseDto {
    let source = match model.source {
        LicenseSource::Console => "console",
        LicenseSource::Cluster => "cluster",
    };
    let license_type = match model.license_type {
        LicenseType::OpenSource => "open_source",
        LicenseType::Trial => "trial",
        LicenseType::Enterprise => "enterprise",
    };

    LicenseDto {
        source: source.to_owned(),
        r#type: license_type.to_owned(),
        expires_at: Some(epoch_seconds_to_proto_timestamp(model.expires_at)),
    }
}

fn connect_status_to_proto(model: SubsystemStatus<Vec<ConnectClusterOverview>>) -> KafkaConnectStatusDto {
    let status = match model {
        SubsystemStatus::NotConfigured => {
            kafka_connect_status_dto::Status::NotConfigured(NotConfiguredDto {})
        }
        SubsystemStatus::Healthy(clusters) => {
            kafka_connect_status_dto::Status::Healthy(ConnectClustersDto {
                clusters: clusters.into_iter().map(connect_cluster_to_proto).collect(),
            })
        }
        SubsystemStatus::Unhealthy { reason } => {
            kafka_connect_status_dto::Status::Unhealthy(unhealthy_to_proto(reason))
        }
    };

    KafkaConnectStatusDto {
        status: Some(status),
    }
}

fn connect_cluster_to_proto(model: ConnectClusterOverview) -> ConnectClusterOverviewDto {
    let status = match model.status {
        EntryStatus::Healthy(details) => {
            connect_cluster_overview_dto::Status::Healthy(ConnectClusterDetailsDto {
                version: details.version,
                installed_plugins: details.installed_plugins as u32,
                commit: details.commit,
                kafka_cluster_id: details.kafka_cluster_id,
            })
        }
        EntryStatus::Unhealthy { reason } => {
            connect_cluster_overview_dto::Status::Unhealthy(unhealthy_to_proto(reason))
        }
    };

    ConnectClusterOverviewDto {
        name: model.name,
        host: model.host,
        status: Some(status),
    }
}

fn schema_registry_status_to_proto(
    model: SubsystemStatus<SchemaRegistryOverview>,
) -> SchemaRegistryStatusDto {
    let status = match model {
        SubsystemStatus::NotConfigured => {
            schema_registry_status_dto::Status::NotConfigured(NotConfiguredDto {})
        }
        SubsystemStatus::Healthy(overview) => {
            schema_registry_status_dto::Status::Healthy(SchemaRegistryOverviewDto {
                registered_subjects: overview.registered_subjects as u32,
            })
        }
        SubsystemStatus::Unhealthy { reason } => {
            schema_registry_status_dto::Status::Unhealthy(unhealthy_to_proto(reason))
        }
    };

    SchemaRegistryStatusDto {
        status: Some(status),
    }
}
