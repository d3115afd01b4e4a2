use http::StatusCode;
use kafka_console::error::ConsoleError;
use tonic::{Code, Status};
use tracing::error;

#[derive(Debug)]
pub enum ApplicationError {
    InvalidArgument(anyhow::Error),
    Console(ConsoleError),
}

impl From<ConsoleError> for ApplicationError {
    fn from(value: ConsoleError) -> Self {
        ApplicationError::Console(value)
    }
}

impl From<ApplicationError> for Status {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::InvalidArgument(e) => {
                error!("{e:?}");
                Status::invalid_argument(format!("{e}"))
            }
            ApplicationError::Console(e) => {
                e.log();
                Status::new(status_code_to_grpc_code(e.status()), e.message())
            }
        }
    }
}

pub fn status_code_to_grpc_code(status: StatusCode) -> Code {
    match status {
        StatusCode::BAD_REQUEST => Code::InvalidArgument,
        StatusCode::FORBIDDEN => Code::PermissionDenied,
        StatusCode::NOT_FOUND => Code::NotFound,
        StatusCode::CONFLICT => Code::AlreadyExists,
        StatusCode::SERVICE_UNAVAILABLE => Code::Unavailable,
        StatusCode::GATEWAY_TIMEOUT => Code::DeadlineExceeded,
        _ => Code::Internal,
    }
}
