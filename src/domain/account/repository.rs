//! Account repository interface

use async_trait::async_trait;

use super::model::Account;
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Save a new account
    async fn save(&self, account: Account) -> DomainResult<Account>;

    /// Find account by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>>;

    /// Find account by email (registration identity)
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Update an existing account
    async fn update(&self, account: Account) -> DomainResult<()>;

    /// Number of stored accounts (admin seeding check)
    async fn count(&self) -> DomainResult<u64>;
}
