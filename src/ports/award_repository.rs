//! Award repository port.
//!
//! Persistence contract for the award ledger. Balance writes go through
//! `update_balance`, a conditional update keyed on the previously observed
//! `used_value`, so concurrent spend/refund on the same award surfaces as a
//! `ConcurrentModification` instead of a lost write.

use async_trait::async_trait;

use crate::domain::award::AwardRecord;
use crate::domain::foundation::{AwardId, Cents, DomainError, TemplateId, UserId};

/// Repository port for user-held awards.
///
/// Implementations must ensure:
/// - Uniqueness on (user_id, template_id); `save` of a duplicate fails
///   with `DuplicateAward`
/// - `update_balance` writes `used_value`/`residual`/`used` only if the
///   stored `used_value` still equals `expected_used_value`, and fails
///   with `ConcurrentModification` otherwise
#[async_trait]
pub trait AwardRepository: Send + Sync {
    /// Save a new award.
    ///
    /// # Errors
    ///
    /// - `DuplicateAward` if the user already holds an award from this
    ///   template (or one with the same name)
    /// - `DatabaseError` on persistence failure
    async fn save(&self, award: &AwardRecord) -> Result<(), DomainError>;

    /// Find an award by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AwardId) -> Result<Option<AwardRecord>, DomainError>;

    /// All awards held by a user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<AwardRecord>, DomainError>;

    /// Find a user's award by name.
    ///
    /// Primary lookup for the attendance award, which is unique per user
    /// by name.
    async fn find_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<AwardRecord>, DomainError>;

    /// Conditionally persist a balance change.
    ///
    /// Writes the award's `used_value`, `residual`, and `used` fields only
    /// if the stored `used_value` still equals `expected_used_value`.
    ///
    /// # Errors
    ///
    /// - `AwardNotFound` if the award doesn't exist
    /// - `ConcurrentModification` if another writer got there first
    /// - `DatabaseError` on persistence failure
    async fn update_balance(
        &self,
        award: &AwardRecord,
        expected_used_value: Cents,
    ) -> Result<(), DomainError>;

    /// Persist a revaluation: new face value and recomputed residual.
    ///
    /// `used_value` is never changed by this write.
    ///
    /// # Errors
    ///
    /// - `AwardNotFound` if the award doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_value(&self, award: &AwardRecord) -> Result<(), DomainError>;

    /// Whether the user holds an award from this template.
    async fn exists(&self, user_id: &UserId, template_id: &TemplateId)
        -> Result<bool, DomainError>;
}
