//! In-memory account store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::MemberAccount;
use crate::ports::AccountRepository;

/// In-memory implementation of the account repository.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; acceptable for test code.
pub struct InMemoryAccountStore {
    // BTreeMap keeps list_all deterministic for tests.
    accounts: RwLock<BTreeMap<String, MemberAccount>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(BTreeMap::new()),
        }
    }

    /// Seeds an account, overwriting any existing one for the user.
    pub fn insert(&self, account: MemberAccount) {
        self.accounts
            .write()
            .expect("InMemoryAccountStore: lock poisoned")
            .insert(account.user_id.to_string(), account);
    }

    pub fn get(&self, user_id: &UserId) -> Option<MemberAccount> {
        self.accounts
            .read()
            .expect("InMemoryAccountStore: lock poisoned")
            .get(user_id.as_str())
            .cloned()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MemberAccount>, DomainError> {
        Ok(self.get(user_id))
    }

    async fn update(&self, account: &MemberAccount) -> Result<(), DomainError> {
        let mut accounts = self
            .accounts
            .write()
            .expect("InMemoryAccountStore: lock poisoned");
        let key = account.user_id.to_string();
        if !accounts.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                format!("No account for user {}", account.user_id),
            ));
        }
        accounts.insert(key, account.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MemberAccount>, DomainError> {
        Ok(self
            .accounts
            .read()
            .expect("InMemoryAccountStore: lock poisoned")
            .values()
            .cloned()
            .collect())
    }
}
