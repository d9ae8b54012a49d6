//! Contract error types for society service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Society service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SocietyError {
    /// Record not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (society, profile, maintenance_request, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// One or more required fields were blank
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Field names in form order
        fields: Vec<String>,
    },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Conflict (duplicate, terminal state, etc.)
    #[error("Conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },

    /// Missing or invalid credentials
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated but not allowed
    #[error("Forbidden: {reason}")]
    Forbidden {
        /// Why the caller may not perform the action
        reason: String,
    },

    /// Uploaded content exceeds the configured limit
    #[error("Payload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Limit in bytes
        limit: usize,
    },

    /// The store rejected the call; `message` is the store's own message
    #[error("Failed to {operation}: {message}")]
    Storage {
        /// Operation that failed (e.g. "create society")
        operation: String,
        /// Error message reported by the store
        message: String,
    },

    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl SocietyError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Wrap a store failure, logging it at the call site
    pub fn storage(operation: &str, error: anyhow::Error) -> Self {
        tracing::error!(operation, error = %error, "store call failed");
        Self::Storage {
            operation: operation.to_string(),
            message: error.to_string(),
        }
    }
}
