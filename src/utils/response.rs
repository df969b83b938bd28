use serde::Serialize;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A user-visible message produced by a screen after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub code: Option<String>,
    pub message: String,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

pub fn success(message: impl Into<String>) -> Notification {
    Notification {
        level: NotificationLevel::Success,
        code: None,
        message: message.into(),
    }
}

pub fn info(message: impl Into<String>) -> Notification {
    Notification {
        level: NotificationLevel::Info,
        code: None,
        message: message.into(),
    }
}

pub fn error(code: &str, message: impl Into<String>) -> Notification {
    Notification {
        level: NotificationLevel::Error,
        code: Some(code.to_string()),
        message: message.into(),
    }
}

/// Logs the error and turns it into a failure notification.
///
/// `context` is the headline the user sees ("Failed to create event"); the
/// error's public message is appended.
pub fn failure(context: &str, err: &AppError) -> Notification {
    err.log();
    error(
        err.code(),
        format!("{}: {}", context, err.public_message()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_carries_code_and_context() {
        let err = AppError::NotFound("Event 'abc' was not found".to_string());
        let note = failure("Failed to update event", &err);

        assert!(note.is_error());
        assert_eq!(note.code.as_deref(), Some("NOT_FOUND"));
        assert_eq!(
            note.message,
            "Failed to update event: Event 'abc' was not found"
        );
    }

    #[test]
    fn test_success_has_no_code() {
        let note = success("Event created successfully!");
        assert_eq!(note.level, NotificationLevel::Success);
        assert!(note.code.is_none());
    }
}
