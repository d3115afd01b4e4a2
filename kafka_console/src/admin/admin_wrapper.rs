use crate::connection_settings::ConnectionSettings;
use anyhow::Context;
use rdkafka::admin::AdminClient;
use rdkafka::client::DefaultClientContext;
use rdkafka::ClientConfig;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminWrapper {
    client: Arc<AdminClient<DefaultClientContext>>,
}

impl AdminWrapper {
    pub fn create(connection_settings: &ConnectionSettings) -> Result<Self, anyhow::Error> {
        let mut config = ClientConfig::try_from(connection_settings)?;

        // https://raw.githubusercontent.com/confluentinc/librdkafka/master/CONFIGURATION.md
        let client: AdminClient<DefaultClientContext> = config
            .set("message.max.bytes", "1000000000")
            .set("receive.message.max.bytes", "2147483647")
            .create()
            .context("While creating kafka AdminClient")?;

        Ok(Self {
            client: Arc::new(client),
        })
    }
}

impl Deref for AdminWrapper {
    type Target = AdminClient<DefaultClientContext>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
