use crate::api::console_service::proto::ConsoleServiceServer;
use crate::api::console_service::{proto, ConsoleService};
use crate::app_config::AppConfig;
use anyhow::Context;
use chrono::Utc;
use kafka_console::console_info::{License, LicenseSource};
use kafka_console::gateway::{BrokerGateway, RdKafkaGateway};
use kafka_console::hooks::{ConsoleHooks, OpenSourceHooks};
use kafka_console::queries::get_overview::OverviewSources;
use kafka_console::subsystems::{
    build_http_client, ClusterAdminApi, ConnectClusters, HttpClusterAdminApi, HttpConnectClusters,
    HttpSchemaRegistry, SchemaRegistry,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run_until_stopped(config: AppConfig) -> Result<(), anyhow::Error> {
    let address: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("While parsing socket address")?;

    let hooks = Arc::new(OpenSourceHooks::new(License::open_source(
        LicenseSource::Console,
        Utc::now(),
    )));
    let overview_sources = build_overview_sources(&config, hooks.clone())?;
    let console_service = ConsoleService::new(overview_sources, hooks, config.overview_timeout());

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
        .build_v1alpha()
        .context("While building reflection service")?;

    info!("Listening {address}");

    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(reflection_service)
        .add_service(ConsoleServiceServer::new(console_service))
        .serve(address)
        .await
        .context("While serving console port")?;

    Ok(())
}

fn build_overview_sources(
    config: &AppConfig,
    console_hooks: Arc<dyn ConsoleHooks>,
) -> Result<OverviewSources, anyhow::Error> {
    let gateway: Arc<dyn BrokerGateway> = Arc::new(
        RdKafkaGateway::create(&config.connection_settings(), config.request_timeout())
            .context("While creating broker gateway")?,
    );
    let http_client =
        build_http_client(config.overview_timeout()).context("While building http client")?;

    let schema_registry = config
        .schema_registry_urls()
        .map(|urls| HttpSchemaRegistry::new(http_client.clone(), urls))
        .transpose()
        .context("While configuring schema registry")?
        .map(|registry| Arc::new(registry) as Arc<dyn SchemaRegistry>);

    let cluster_admin = config
        .admin_api_urls()
        .map(|urls| HttpClusterAdminApi::new(http_client.clone(), urls))
        .transpose()
        .context("While configuring admin api")?
        .map(|api| Arc::new(api) as Arc<dyn ClusterAdminApi>);

    let kafka_connect = config.connect_clusters().map(|clusters| {
        Arc::new(HttpConnectClusters::new(http_client.clone(), clusters)) as Arc<dyn ConnectClusters>
    });

    info!(
        schema_registry = schema_registry.is_some(),
        admin_api = cluster_admin.is_some(),
        kafka_connect = kafka_connect.is_some(),
        "Configured subsystems"
    );

    Ok(OverviewSources {
        gateway,
        cluster_admin,
        schema_registry,
        kafka_connect,
        console_info: config.console_info(),
        console_hooks,
    })
}
