//! Repository error kinds.
//!
//! This module defines the failure categories a backing store can surface
//! during list and mutation calls, with helpers for retry decisions and
//! user-facing presentation. Failures are representable state for the
//! rendering layer, never a panic.

use std::fmt;

/// Failure categories surfaced by an entity repository.
///
/// Each category maps to a distinct user-visible treatment: validation
/// errors are shown inline on the form, missing records send the user back
/// to the list, transport failures show a retryable banner over the last
/// good data, and authorization failures are handed to the identity layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    /// The submitted input was rejected.
    Validation {
        /// Offending field in wire casing, when the backend names one.
        field: Option<String>,
        message: String,
    },

    /// The referenced record no longer exists.
    NotFound {
        entity: String,
        id: String,
    },

    /// Network or backend failure.
    Transport {
        /// HTTP status when the failure came from a response.
        status: Option<u16>,
        message: String,
    },

    /// The caller is not allowed to perform the operation.
    Authorization {
        message: String,
    },
}

impl RepoError {
    /// Check if this error is likely transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            RepoError::Validation { .. } => false,
            RepoError::NotFound { .. } => false,
            RepoError::Transport { status, .. } => match status {
                // No status means the request never completed.
                None => true,
                Some(code) => *code >= 500 || *code == 429 || *code == 408,
            },
            RepoError::Authorization { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            RepoError::Validation { field, message } => match field {
                Some(field) => format!("'{}' is invalid: {}", field, message),
                None => message.clone(),
            },
            RepoError::NotFound { entity, .. } => {
                format!(
                    "That record no longer exists in {}. It may have been deleted by someone else.",
                    entity
                )
            }
            RepoError::Transport { status, .. } => match status {
                Some(code) if *code >= 500 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                Some(429) => "Too many requests. Please wait a moment and try again.".to_string(),
                Some(code) => {
                    format!("The server returned an error (HTTP {}). Please try again.", code)
                }
                None => {
                    "Unable to reach the server. Please check your connection and try again."
                        .to_string()
                }
            },
            RepoError::Authorization { .. } => {
                "You don't have permission for this action. Please sign in again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            RepoError::Validation { .. } => "E_REPO_VALIDATION",
            RepoError::NotFound { .. } => "E_REPO_NOT_FOUND",
            RepoError::Transport { .. } => "E_REPO_TRANSPORT",
            RepoError::Authorization { .. } => "E_REPO_AUTH",
        }
    }

    /// Shorthand for a transport error with no HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        RepoError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Shorthand for a validation error on a named field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        RepoError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Shorthand for a missing record.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        RepoError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::Validation { field, message } => match field {
                Some(field) => write!(f, "Validation failed on '{}': {}", field, message),
                None => write!(f, "Validation failed: {}", message),
            },
            RepoError::NotFound { entity, id } => {
                write!(f, "No record '{}' in {}", id, entity)
            }
            RepoError::Transport { status, message } => match status {
                Some(code) => write!(f, "Transport error (HTTP {}): {}", code, message),
                None => write!(f, "Transport error: {}", message),
            },
            RepoError::Authorization { message } => {
                write!(f, "Authorization failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RepoError {}

/// Classify a reqwest error into a RepoError.
///
/// Covers failures raised by the HTTP client itself (connect, timeout,
/// body decode); non-2xx responses are mapped from their status and body
/// by the HTTP adapter before this is reached.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> RepoError {
    if err.is_timeout() {
        RepoError::Transport {
            status: None,
            message: format!("request to '{}' timed out", url),
        }
    } else if err.is_connect() {
        RepoError::Transport {
            status: None,
            message: format!("could not connect to '{}': {}", url, err),
        }
    } else if err.is_decode() {
        RepoError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: format!("failed to decode response: {}", err),
        }
    } else if let Some(status) = err.status() {
        RepoError::Transport {
            status: Some(status.as_u16()),
            message: err.to_string(),
        }
    } else {
        RepoError::Transport {
            status: None,
            message: err.to_string(),
        }
    }
}
