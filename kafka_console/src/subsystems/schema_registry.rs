use crate::subsystems::http_client::get_json;
use anyhow::{bail, Context};
use async_trait::async_trait;

#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    async fn subjects(&self) -> Result<Vec<String>, anyhow::Error>;
}

pub struct HttpSchemaRegistry {
    client: reqwest::Client,
    urls: Vec<String>,
}

impl HttpSchemaRegistry {
    pub fn new(client: reqwest::Client, urls: Vec<String>) -> Result<Self, anyhow::Error> {
        if urls.is_empty() {
            bail!("Schema registry is enabled but no urls are configured")
        }

        Ok(Self { client, urls })
    }
}

#[async_trait]
impl SchemaRegistry for HttpSchemaRegistry {
    async fn subjects(&self) -> Result<Vec<String>, anyhow::Error> {
        get_json(&self.client, &self.urls, "/subjects")
            .await
            .context("While fetching subjects")
    }
}
