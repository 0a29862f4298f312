//! Award ledger error types.

use crate::domain::foundation::{AwardId, DomainError, ErrorCode, UserId};

/// Errors raised by award ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardError {
    /// The referenced award document does not exist.
    NotFound(AwardId),

    /// The user already holds an award from this template.
    ///
    /// A benign rejection: granting is idempotent per (user, template).
    Duplicate { user_id: UserId, name: String },

    /// The referenced template does not exist in the catalog.
    TemplateNotFound(String),

    /// The award cannot be drawn from (attendance award).
    NotSpendable(String),

    /// Another writer changed the award balance between read and write.
    Conflict(AwardId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error from the backing store.
    Infrastructure(String),
}

impl AwardError {
    pub fn not_found(id: AwardId) -> Self {
        AwardError::NotFound(id)
    }

    pub fn duplicate(user_id: UserId, name: impl Into<String>) -> Self {
        AwardError::Duplicate {
            user_id,
            name: name.into(),
        }
    }

    pub fn template_not_found(name: impl Into<String>) -> Self {
        AwardError::TemplateNotFound(name.into())
    }

    pub fn not_spendable(name: impl Into<String>) -> Self {
        AwardError::NotSpendable(name.into())
    }

    pub fn conflict(id: AwardId) -> Self {
        AwardError::Conflict(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AwardError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AwardError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AwardError::NotFound(_) => ErrorCode::AwardNotFound,
            AwardError::Duplicate { .. } => ErrorCode::DuplicateAward,
            AwardError::TemplateNotFound(_) => ErrorCode::TemplateNotFound,
            AwardError::NotSpendable(_) => ErrorCode::AwardNotSpendable,
            AwardError::Conflict(_) => ErrorCode::ConcurrentModification,
            AwardError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AwardError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            AwardError::NotFound(id) => format!("Award not found: {}", id),
            AwardError::Duplicate { user_id, name } => {
                format!("User {} already holds the award '{}'", user_id, name)
            }
            AwardError::TemplateNotFound(name) => {
                format!("No award template named '{}'", name)
            }
            AwardError::NotSpendable(name) => {
                format!("Award '{}' cannot be spent", name)
            }
            AwardError::Conflict(id) => {
                format!("Award {} was modified concurrently; retry the operation", id)
            }
            AwardError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AwardError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AwardError::Infrastructure(_) | AwardError::Conflict(_)
        )
    }
}

impl std::fmt::Display for AwardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AwardError {}

impl From<DomainError> for AwardError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrentModification => {
                // Repository reported a lost race without the id; keep the code.
                AwardError::Infrastructure(err.to_string())
            }
            ErrorCode::ValidationFailed => AwardError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => AwardError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AwardError> for DomainError {
    fn from(err: AwardError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
