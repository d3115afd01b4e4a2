use anyhow::Context;
use config::Config;
use kafka_console::connection_settings::{ConnectionSettings, SecurityProtocol};
use kafka_console::console_info::ConsoleInfo;
use kafka_console::subsystems::ConnectClusterTarget;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub kafka: KafkaConfig,
    pub schema_registry: Option<SchemaRegistryConfig>,
    pub connect: Option<ConnectConfig>,
    pub admin_api: Option<AdminApiConfig>,
    #[serde(default = "default_overview_timeout_ms")]
    pub overview_timeout_ms: u64,
    pub console: ConsoleConfig,
}

#[derive(Deserialize, Debug)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    #[serde(default)]
    pub security_protocol: SecurityProtocol,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Deserialize, Debug)]
pub struct SchemaRegistryConfig {
    pub enabled: bool,
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct ConnectConfig {
    pub enabled: bool,
    #[serde(default)]
    pub clusters: Vec<ConnectClusterConfig>,
}

#[derive(Deserialize, Debug)]
pub struct ConnectClusterConfig {
    pub name: String,
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct AdminApiConfig {
    pub enabled: bool,
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct ConsoleConfig {
    pub version: String,
    pub built_at: String,
}

fn default_overview_timeout_ms() -> u64 {
    6_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

impl AppConfig {
    pub fn build() -> Result<Self, anyhow::Error> {
        let config = Config::builder()
            .add_source(config::File::with_name("appsettings"))
            .add_source(config::Environment::with_prefix("App").separator("__"))
            .build()
            .context("While building config")?;

        let deserialized_config = config
            .try_deserialize()
            .context("While deserializing config")?;

        info!("App config: {deserialized_config:?}");

        Ok(deserialized_config)
    }

    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            brokers: self.kafka.brokers.clone(),
            security_protocol: self.kafka.security_protocol,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.kafka.request_timeout_ms)
    }

    pub fn overview_timeout(&self) -> Duration {
        Duration::from_millis(self.overview_timeout_ms)
    }

    pub fn console_info(&self) -> ConsoleInfo {
        ConsoleInfo {
            version: self.console.version.clone(),
            built_at: self.console.built_at.clone(),
        }
    }

    /// Urls of the schema registry, `None` when it is disabled.
    pub fn schema_registry_urls(&self) -> Option<Vec<String>> {
        self.schema_registry
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.urls.clone())
    }

    pub fn admin_api_urls(&self) -> Option<Vec<String>> {
        self.admin_api
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.urls.clone())
    }

    pub fn connect_clusters(&self) -> Option<Vec<ConnectClusterTarget>> {
        self.connect.as_ref().filter(|c| c.enabled).map(|c| {
            c.clusters
                .iter()
                .map(|cluster| ConnectClusterTarget {
                    name: cluster.name.clone(),
                    url: cluster.url.clone(),
                })
                .collect()
        })
    }
}
