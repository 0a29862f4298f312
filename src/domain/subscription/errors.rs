//! Subscription and reconciliation error types.

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, UserId};

/// Errors raised by subscription and reconciliation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// No account document exists for this user.
    AccountNotFound(UserId),

    /// The referenced payment does not exist.
    PaymentNotFound(PaymentId),

    /// The payment was already completed, cancelled, or failed.
    AlreadySettled(PaymentId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error from the backing store.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn account_not_found(user_id: UserId) -> Self {
        SubscriptionError::AccountNotFound(user_id)
    }

    pub fn payment_not_found(id: PaymentId) -> Self {
        SubscriptionError::PaymentNotFound(id)
    }

    pub fn already_settled(id: PaymentId) -> Self {
        SubscriptionError::AlreadySettled(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::AccountNotFound(_) => ErrorCode::AccountNotFound,
            SubscriptionError::PaymentNotFound(_) => ErrorCode::PaymentNotFound,
            SubscriptionError::AlreadySettled(_) => ErrorCode::PaymentAlreadySettled,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::AccountNotFound(user_id) => {
                format!("No account found for user {}", user_id)
            }
            SubscriptionError::PaymentNotFound(id) => format!("Payment not found: {}", id),
            SubscriptionError::AlreadySettled(id) => {
                format!("Payment {} is already settled", id)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubscriptionError::Infrastructure(_))
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PaymentAlreadySettled => {
                // The payment's own transition guard raised this; keep the code.
                SubscriptionError::ValidationFailed {
                    field: "status".to_string(),
                    message: err.to_string(),
                }
            }
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
