mod cluster_admin;
mod http_client;
mod kafka_connect;
mod schema_registry;

pub use cluster_admin::*;
pub use http_client::build_http_client;
pub use kafka_connect::*;
pub use schema_registry::*;
