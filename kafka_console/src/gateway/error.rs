use crate::gateway::{BrokerId, RequestKind};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("broker is unreachable: {message}")]
    Unreachable { message: String },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("request was cancelled before a response arrived")]
    Cancelled,

    #[error("broker {0} is not part of the cluster metadata")]
    UnknownBroker(BrokerId),

    #[error("{kind} requests are not supported by this gateway")]
    Unsupported { kind: RequestKind },

    #[error("expected a {expected} response, got {actual}")]
    UnexpectedResponse {
        expected: RequestKind,
        actual: RequestKind,
    },

    #[error("shard worker stopped without reporting a result")]
    WorkerAborted,
}

impl GatewayError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}
