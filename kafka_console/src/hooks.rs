use crate::console_info::License;
use crate::error::ConsoleError;
use async_trait::async_trait;
use http::StatusCode;

#[async_trait]
pub trait AuthorizationHooks: Send + Sync {
    async fn can_delete_topic(&self, topic_name: &str) -> Result<bool, ConsoleError>;

    async fn can_delete_topic_records(&self, topic_name: &str) -> Result<bool, ConsoleError>;

    async fn can_see_consumer_group(&self, group_id: &str) -> Result<bool, ConsoleError>;

    async fn can_view_connect_cluster(&self, cluster_name: &str) -> Result<bool, ConsoleError>;

    async fn can_view_schemas(&self) -> Result<bool, ConsoleError>;
}

pub trait ConsoleHooks: Send + Sync {
    fn console_license_information(&self) -> License;

    fn enabled_features(&self) -> Vec<String>;
}

pub struct OpenSourceHooks {
    license: License,
}

impl OpenSourceHooks {
    pub fn new(license: License) -> Self {
        Self { license }
    }
}

#[async_trait]
impl AuthorizationHooks for OpenSourceHooks {
    async fn can_delete_topic(&self, _topic_name: &str) -> Result<bool, ConsoleError> {
        Ok(true)
    }

    async fn can_delete_topic_records(&self, _topic_name: &str) -> Result<bool, ConsoleError> {
        Ok(true)
    }

    async fn can_see_consumer_group(&self, _group_id: &str) -> Result<bool, ConsoleError> {
        Ok(true)
    }

    async fn can_view_connect_cluster(&self, _cluster_name: &str) -> Result<bool, ConsoleError> {
        Ok(true)
    }

    async fn can_view_schemas(&self) -> Result<bool, ConsoleError> {
        Ok(true)
    }
}

impl ConsoleHooks for OpenSourceHooks {
    fn console_license_information(&self) -> License {
        self.license.clone()
    }

    fn enabled_features(&self) -> Vec<String> {
        vec![]
    }
}

pub fn ensure_allowed(
    allowed: Result<bool, ConsoleError>,
    action: &str,
    log_field: (&'static str, &str),
) -> Result<(), ConsoleError> {
    if allowed? {
        return Ok(());
    }

    let (key, value) = log_field;
    Err(ConsoleError::new(
        anyhow::anyhow!("permission to {action} denied by authorization hooks"),
        StatusCode::FORBIDDEN,
        format!("You don't have permissions to {action}"),
    )
    .with_log_field(key, value)
    .with_silence(true))
}
