//! Account repository port.
//!
//! Persistence contract for `MemberAccount` documents. The reconciler's
//! audit sweep reads all accounts; repair updates one.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::MemberAccount;

/// Repository port for member account persistence.
///
/// Implementations must ensure:
/// - One account per user id
/// - `update` overwrites the whole document (status, snapshot, flags)
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by user id.
    ///
    /// Returns `None` if the user has no account document.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<MemberAccount>, DomainError>;

    /// Persist changes to an existing account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, account: &MemberAccount) -> Result<(), DomainError>;

    /// List every account, for the audit sweep.
    async fn list_all(&self) -> Result<Vec<MemberAccount>, DomainError>;
}
