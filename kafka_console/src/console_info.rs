use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleInfo {
    pub version: String,
    pub built_at: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseSource {
    Console,
    Cluster,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
    OpenSource,
    Trial,
    Enterprise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub source: LicenseSource,
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    pub expires_at: i64,
}

impl License {
    pub fn open_source(source: LicenseSource, now: DateTime<Utc>) -> Self {
        Self {
            source,
            license_type: LicenseType::OpenSource,
            expires_at: (now + TimeDelta::days(365 * 10)).timestamp(),
        }
    }
}
