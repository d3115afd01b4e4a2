use crate::error::{error_with_dynamic_message, ConsoleError, KafkaErrorCode, KafkaProtocolError, LogField};
use crate::gateway::GatewayError;
use crate::sharding::{FanOutFailure, SingleItemError};
use http::StatusCode;
use tracing::warn;

#[derive(Debug)]
pub enum Failure {
    Transport(GatewayError),
    Protocol(KafkaProtocolError),
    Malformed(String),
}

impl From<GatewayError> for Failure {
    fn from(value: GatewayError) -> Self {
        Failure::Transport(value)
    }
}

impl From<KafkaProtocolError> for Failure {
    fn from(value: KafkaProtocolError) -> Self {
        Failure::Protocol(value)
    }
}

impl From<SingleItemError> for Failure {
    fn from(value: SingleItemError) -> Self {
        match value {
            SingleItemError::Protocol(error) => Failure::Protocol(error),
            malformed => Failure::Malformed(malformed.to_string()),
        }
    }
}

/// Renders a failure of `action` (e.g. "delete Kafka topic") into a [`ConsoleError`].
///
/// Transport failures and malformed answers are reported as service unavailable.
/// Protocol failures keep the status their error code maps to.
pub fn translate(failure: impl Into<Failure>, action: &str) -> ConsoleError {
    match failure.into() {
        Failure::Transport(error) => ConsoleError::new(
            error.clone(),
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Failed to {action}: {error}"),
        ),
        Failure::Protocol(error) => ConsoleError::new(
            error.clone(),
            error.status_code(),
            format!("Failed to {action}: {error}"),
        ),
        Failure::Malformed(detail) => ConsoleError::new(
            anyhow::anyhow!(detail.clone()),
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Unexpected Kafka response: {detail}"),
        ),
    }
}

pub fn translate_code(code: i16, dynamic_message: Option<&str>, action: &str) -> Option<ConsoleError> {
    error_with_dynamic_message(code, dynamic_message).map(|error| translate(error, action))
}

pub fn translate_fan_out<T>(failure: FanOutFailure<T>, action: &str) -> ConsoleError {
    let FanOutFailure { error, result } = failure;

    let shard_fields = result
        .failures()
        .map(|(broker, error)| {
            warn!(broker_id = broker.node_id, "Shard of '{action}' failed: {error}");
            LogField::new("failed_broker", format!("{}: {error}", broker.node_id))
        })
        .collect::<Vec<_>>();

    ConsoleError::new(
        error.clone(),
        StatusCode::SERVICE_UNAVAILABLE,
        format!("Failed to {action}: {error}"),
    )
    .with_log_field("requests_sent", result.requests_sent().to_string())
    .with_log_field("requests_failed", result.requests_failed().to_string())
    .with_log_fields(shard_fields)
}

pub fn is_not_found(error: &ConsoleError) -> bool {
    error
        .cause()
        .downcast_ref::<KafkaProtocolError>()
        .and_then(KafkaProtocolError::kind)
        .is_some_and(|kind| {
            matches!(
                kind,
                KafkaErrorCode::UnknownTopicOrPartition | KafkaErrorCode::GroupIdNotFound
            )
        })
}
