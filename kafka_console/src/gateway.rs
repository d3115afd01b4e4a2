mod broker_gateway;
mod error;
mod rdkafka_gateway;
mod requests;

pub use broker_gateway::*;
pub use error::*;
pub use rdkafka_gateway::*;
pub use requests::*;
