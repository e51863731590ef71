use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    IndexOutOfRange,
    InvalidConfig,
    Parse,
}

/// Failure of a single grid command. The controller is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell index {index} is outside 0..{len}")]
    IndexOutOfRange { index: i64, len: usize },
}

impl GridError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GridError::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
    #[error("malformed command '{0}' (expected click:<i>, doubleClick:<i>, randomize or reset)")]
    Command(String),
}

impl ParseError {
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Unknown {
            kind,
            value: value.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::Parse
    }
}

/// Serializable error payload for hosts that report failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&GridError> for ErrorReport {
    fn from(value: &GridError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<&ParseError> for ErrorReport {
    fn from(value: &ParseError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_carry_error_codes() {
        let report = ErrorReport::from(&GridError::IndexOutOfRange { index: -1, len: 25 });
        assert_eq!(report.code, ErrorCode::IndexOutOfRange);
        assert_eq!(report.message, "cell index -1 is outside 0..25");

        let report = ErrorReport::from(&ParseError::Command("tap:1".to_string()));
        assert_eq!(report.code, ErrorCode::Parse);
        assert!(report.message.starts_with("malformed command 'tap:1'"));
    }
}
