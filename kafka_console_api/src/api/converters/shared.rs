use crate::api::console_service::proto::{BrokerErrorDto, UnhealthyDto};
use kafka_console::sharding::BrokerFailure;
use std::time::Duration;

pub fn broker_failure_to_proto(model: BrokerFailure) -> BrokerErrorDto {
    BrokerErrorDto {
        broker_id: model.broker_id,
        error: model.error,
    }
}

pub fn unhealthy_to_proto(reason: String) -> UnhealthyDto {
    UnhealthyDto { reason }
}

pub fn proto_timeout_to_internal(timeout_ms: Option<u32>, default: Duration) -> Duration {
    timeout_ms
        .filter(|timeout| *timeout > 0)
        .map(|timeout| Duration::from_millis(timeout as u64))
        .unwrap_or(default)
}
