//! SeaORM implementation of AccountRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::db_err;
use crate::domain::account::{Account, AccountRepository, AccountRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::account;

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: account::Model) -> Account {
    Account {
        id: m.id,
        email: m.email,
        name: m.name,
        phone: m.phone,
        password_hash: m.password_hash,
        is_verified: m.is_verified,
        is_active: m.is_active,
        otp_code: m.otp_code,
        otp_expires_at: m.otp_expires_at,
        role: AccountRole::from_str(&m.role),
        created_at: m.created_at,
    }
}

fn domain_to_active(a: Account) -> account::ActiveModel {
    account::ActiveModel {
        id: Set(a.id),
        email: Set(a.email),
        name: Set(a.name),
        phone: Set(a.phone),
        password_hash: Set(a.password_hash),
        is_verified: Set(a.is_verified),
        is_active: Set(a.is_active),
        otp_code: Set(a.otp_code),
        otp_expires_at: Set(a.otp_expires_at),
        role: Set(a.role.as_str().to_string()),
        created_at: Set(a.created_at),
    }
}

// ── AccountRepository impl ──────────────────────────────────────

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn save(&self, a: Account) -> DomainResult<Account> {
        debug!("Saving account: {}", a.email);

        let saved = domain_to_active(a).insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, a: Account) -> DomainResult<()> {
        debug!("Updating account: {}", a.email);

        let existing = account::Entity::find_by_id(&a.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: a.id,
            });
        }

        domain_to_active(a).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        account::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
