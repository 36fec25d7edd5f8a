use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::utils::file_size::FileSizeUtils;

pub const INVALID_TYPE_MESSAGE: &str = "Please upload a JSON file";
pub const UNREADABLE_MESSAGE: &str = "Could not read the selected file";
pub const RETRY_MESSAGE: &str = "Failed to compute odds. Please try again.";

/// Everything that can end a submission cycle in `Failed`.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("file name {name:?} does not end with {expected}")]
    InvalidExtension { name: String, expected: &'static str },

    #[error("file {name:?} is {size} bytes, limit is {limit}")]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("service responded with status {status}")]
    Service { status: u16 },

    #[error("malformed response body: {0}")]
    MalformedResponse(String),

    #[error("probability {0} is outside 0..=100")]
    OutOfRange(i64),
}

impl WorkflowError {
    /// Text shown in the error banner. Transport and service details stay in
    /// the logs.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::InvalidExtension { .. } => INVALID_TYPE_MESSAGE.to_string(),
            WorkflowError::TooLarge { size, limit, .. } => format!(
                "File is too large ({}); the limit is {}",
                FileSizeUtils::format_size(*size),
                FileSizeUtils::format_size(*limit)
            ),
            WorkflowError::Unreadable { .. } => UNREADABLE_MESSAGE.to_string(),
            WorkflowError::Transport(_)
            | WorkflowError::Timeout(_)
            | WorkflowError::Service { .. }
            | WorkflowError::MalformedResponse(_)
            | WorkflowError::OutOfRange(_) => RETRY_MESSAGE.to_string(),
        }
    }

    /// Validation problems are caught before any request is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkflowError::InvalidExtension { .. }
                | WorkflowError::TooLarge { .. }
                | WorkflowError::Unreadable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_share_the_generic_message() {
        let errors = [
            WorkflowError::Timeout(Duration::from_secs(30)),
            WorkflowError::Service { status: 500 },
            WorkflowError::Service { status: 404 },
            WorkflowError::MalformedResponse("missing `odds` field".into()),
            WorkflowError::OutOfRange(150),
        ];
        for error in errors {
            assert_eq!(error.user_message(), RETRY_MESSAGE);
            assert!(!error.is_validation());
        }
    }

    #[test]
    fn status_code_is_not_shown_to_the_user() {
        let error = WorkflowError::Service { status: 503 };
        assert!(!error.user_message().contains("503"));
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn validation_messages_are_specific() {
        let invalid = WorkflowError::InvalidExtension {
            name: "plan.txt".into(),
            expected: ".json",
        };
        assert_eq!(invalid.user_message(), INVALID_TYPE_MESSAGE);
        assert!(invalid.is_validation());

        let large = WorkflowError::TooLarge {
            name: "plan.json".into(),
            size: 2 * 1024 * 1024,
            limit: 1024 * 1024,
        };
        assert_eq!(
            large.user_message(),
            "File is too large (2.00 MB); the limit is 1.00 MB"
        );
    }
}
