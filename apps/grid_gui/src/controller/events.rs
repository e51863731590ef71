//! Worker-to-UI events and error modeling for the grid GUI.

use grid_core::ConfigError;
use shared::{
    error::{ErrorCode, GridError},
    protocol::GridSnapshot,
};

#[derive(Debug)]
pub enum UiEvent {
    Snapshot(Box<GridSnapshot>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Command,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("outside")
            || message_lower.contains("invalid")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("disconnected")
            || message_lower.contains("queue")
            || message_lower.contains("worker")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_grid_error(err: &GridError) -> Self {
        Self {
            category: category_for_code(err.code()),
            context: UiErrorContext::Command,
            message: err.to_string(),
        }
    }

    /// Settings rejected while the worker builds its controller.
    pub fn from_config_error(err: &ConfigError) -> Self {
        Self {
            category: category_for_code(err.code()),
            context: UiErrorContext::BackendStartup,
            message: format!("Invalid grid config: {err}"),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn category_for_code(code: ErrorCode) -> UiErrorCategory {
    match code {
        ErrorCode::IndexOutOfRange | ErrorCode::InvalidConfig | ErrorCode::Parse => {
            UiErrorCategory::Validation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_errors_are_validation_failures() {
        let err = UiError::from_grid_error(&GridError::IndexOutOfRange { index: 30, len: 25 });
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::Command);
        assert_eq!(err.message(), "cell index 30 is outside 0..25");
    }

    #[test]
    fn config_errors_are_startup_validation_failures() {
        let err = UiError::from_config_error(&ConfigError::ZeroModulus);
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert_eq!(
            err.message(),
            "Invalid grid config: checksum modulus must be non-zero"
        );
    }

    #[test]
    fn classifies_worker_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Grid worker disconnected; restart the application",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unknown_messages_stay_unknown() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
    }
}
