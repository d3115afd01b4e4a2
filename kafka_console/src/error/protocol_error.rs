use crate::error::KafkaErrorCode;
use getset::{CopyGetters, Getters};
use http::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct KafkaProtocolError {
    #[getset(get_copy = "pub")]
    code: i16,
    #[getset(get = "pub")]
    dynamic_message: Option<String>,
}

pub fn error_for_code(code: i16) -> Option<KafkaProtocolError> {
    error_with_dynamic_message(code, None)
}

pub fn error_with_dynamic_message(code: i16, message: Option<&str>) -> Option<KafkaProtocolError> {
    if code == 0 {
        return None;
    }

    let dynamic_message = message
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned);

    Some(KafkaProtocolError {
        code,
        dynamic_message,
    })
}

impl KafkaProtocolError {
    pub fn kind(&self) -> Option<KafkaErrorCode> {
        KafkaErrorCode::from_code(self.code)
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind()
            .map(KafkaErrorCode::status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Display for KafkaProtocolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{}: {}", kind.name(), kind.description())?,
            None => write!(
                f,
                "UNKNOWN_ERROR_CODE({}): The broker answered with an unrecognized error code.",
                self.code
            )?,
        }

        if let Some(message) = &self.dynamic_message {
            write!(f, ": {message}")?;
        }

        Ok(())
    }
}

impl std::error::Error for KafkaProtocolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_code_is_not_an_error() {
        assert!(error_for_code(0).is_none());
        assert!(error_with_dynamic_message(0, Some("ignored")).is_none());
    }

    #[test]
    fn message_keeps_description_and_dynamic_text() {
        let error = error_with_dynamic_message(73, Some("deletion is disabled on this cluster")).unwrap();

        assert_eq!(
            error.to_string(),
            "TOPIC_DELETION_DISABLED: Topic deletion is disabled.: deletion is disabled on this cluster"
        );
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn blank_dynamic_message_is_dropped() {
        let error = error_with_dynamic_message(3, Some("  ")).unwrap();

        assert_eq!(error.dynamic_message(), &None);
        assert_eq!(
            error.to_string(),
            "UNKNOWN_TOPIC_OR_PARTITION: This server does not host this topic-partition."
        );
    }

    #[test]
    fn unknown_code_falls_back_to_generic_failure() {
        let error = error_for_code(1234).unwrap();

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("UNKNOWN_ERROR_CODE(1234)"));
    }
}
