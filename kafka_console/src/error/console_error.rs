use getset::{CopyGetters, Getters};
use http::StatusCode;
use std::fmt::{Display, Formatter};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogField {
    pub key: &'static str,
    pub value: String,
}

impl LogField {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

impl Display for LogField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

const IDENTIFIER_FIELDS: [&str; 2] = ["topic_name", "group_id"];

#[derive(Debug, Getters, CopyGetters)]
pub struct ConsoleError {
    #[getset(get = "pub")]
    cause: anyhow::Error,
    #[getset(get_copy = "pub")]
    status: StatusCode,
    #[getset(get = "pub")]
    message: String,
    #[getset(get = "pub")]
    log_fields: Vec<LogField>,
    /// Expected conditions (e.g. deleting something that is already gone) are not
    /// logged as errors.
    #[getset(get_copy = "pub")]
    is_silent: bool,
}

impl ConsoleError {
    pub fn new(
        cause: impl Into<anyhow::Error>,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            cause: cause.into(),
            status,
            message: message.into(),
            log_fields: vec![],
            is_silent: false,
        }
    }

    pub fn with_log_field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.log_fields.push(LogField::new(key, value));
        self
    }

    pub fn with_log_fields(mut self, fields: impl IntoIterator<Item = LogField>) -> Self {
        self.log_fields.extend(fields);
        self
    }

    pub fn with_silence(mut self, is_silent: bool) -> Self {
        self.is_silent = is_silent;
        self
    }

    pub fn log_field(&self, key: &str) -> Option<&str> {
        self.log_fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    pub fn log(&self) {
        let topic_name = self.log_field("topic_name");
        let group_id = self.log_field("group_id");
        let fields = self
            .log_fields
            .iter()
            .filter(|field| !IDENTIFIER_FIELDS.contains(&field.key))
            .map(LogField::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        if self.is_silent {
            debug!(
                status = self.status.as_u16(),
                topic_name,
                group_id,
                fields = %fields,
                "{}: {:?}",
                self.message,
                self.cause
            );
        } else {
            error!(
                status = self.status.as_u16(),
                topic_name,
                group_id,
                fields = %fields,
                "{}: {:?}",
                self.message,
                self.cause
            );
        }
    }
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let cause: &(dyn std::error::Error + 'static) = self.cause.as_ref();
        Some(cause)
    }
}
