//! Registration and login: the OTP-gated account lifecycle
//!
//! Accounts move Unregistered -> PendingVerification -> Verified ->
//! Active (credential set). Every transition is driven here; the
//! repository only stores state.

use std::sync::Arc;

use chrono::{Duration, Utc};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::domain::account::Account;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::{self, JwtConfig};
use crate::infrastructure::notify::OtpSink;
use crate::shared::time::is_expired;

use super::otp::OtpGenerator;

/// Minimum credential length; anything shorter is rejected as weak
const MIN_SECRET_LEN: usize = 6;

/// Issued session: a signed token plus the account it belongs to.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub account: Account,
}

/// Registration service configuration
#[derive(Clone)]
pub struct RegistrationConfig {
    pub otp_ttl_minutes: i64,
    pub pbkdf2_iterations: u32,
    pub jwt: JwtConfig,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            otp_ttl_minutes: 10,
            pbkdf2_iterations: 100_000,
            jwt: JwtConfig::default(),
        }
    }
}

pub struct RegistrationService {
    repos: Arc<dyn RepositoryProvider>,
    sink: Arc<dyn OtpSink>,
    otp_gen: Arc<dyn OtpGenerator>,
    config: RegistrationConfig,
}

impl RegistrationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        sink: Arc<dyn OtpSink>,
        otp_gen: Arc<dyn OtpGenerator>,
        config: RegistrationConfig,
    ) -> Self {
        Self {
            repos,
            sink,
            otp_gen,
            config,
        }
    }

    /// Create or refresh a pending account and dispatch a one-time code.
    ///
    /// Re-registering an unverified account is idempotent: the latest
    /// code wins and name/phone are updated in place.
    pub async fn register(&self, email: &str, name: &str, phone: &str) -> DomainResult<()> {
        let code = self.otp_gen.generate();
        let expires_at = Utc::now() + Duration::minutes(self.config.otp_ttl_minutes);

        match self.repos.accounts().find_by_email(email).await? {
            Some(existing) if existing.is_activated() => {
                return Err(DomainError::Conflict(format!(
                    "Account {} is already registered",
                    email
                )));
            }
            Some(mut existing) => {
                existing.name = name.to_string();
                existing.phone = phone.to_string();
                existing.issue_otp(code.clone(), expires_at);
                self.repos.accounts().update(existing).await?;
            }
            None => {
                let account = Account::pending(email, name, phone, code.clone(), expires_at);
                self.repos.accounts().save(account).await?;
            }
        }

        info!(email, "Registration code issued");
        self.dispatch_code(email, &code).await;
        Ok(())
    }

    /// Check the one-time code; on success the account becomes verified
    /// and the code is consumed.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<()> {
        let mut account = self.find_account(email).await?;

        if account.is_activated() {
            return Err(DomainError::Conflict(format!(
                "Account {} is already active",
                email
            )));
        }
        if is_expired(account.otp_expires_at, Utc::now()) {
            return Err(DomainError::Expired("one-time code".to_string()));
        }
        let stored = account.otp_code.as_deref().unwrap_or("");
        if !codes_match(stored, code) {
            return Err(DomainError::Mismatch("wrong one-time code".to_string()));
        }

        account.mark_verified();
        self.repos.accounts().update(account).await?;
        info!(email, "Account verified");
        Ok(())
    }

    /// Set the credential on a verified account; activates it and
    /// issues the first session token.
    pub async fn set_password(&self, email: &str, secret: &str) -> DomainResult<Session> {
        let mut account = self.find_account(email).await?;

        if !account.is_verified {
            return Err(DomainError::NotVerified(format!(
                "Account {} has not verified its email",
                email
            )));
        }
        if account.is_activated() {
            return Err(DomainError::Conflict(format!(
                "Account {} already has a password",
                email
            )));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(DomainError::WeakSecret(format!(
                "password must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }

        account.password_hash = Some(crypto::hash_password(
            secret,
            self.config.pbkdf2_iterations,
        ));
        self.repos.accounts().update(account.clone()).await?;
        info!(email, "Account activated");

        self.issue_session(account)
    }

    /// Regenerate and redispatch the one-time code.
    pub async fn resend_otp(&self, email: &str) -> DomainResult<()> {
        let mut account = self.find_account(email).await?;

        if account.is_activated() {
            return Err(DomainError::Conflict(format!(
                "Account {} is already active",
                email
            )));
        }

        let code = self.otp_gen.generate();
        let expires_at = Utc::now() + Duration::minutes(self.config.otp_ttl_minutes);
        account.issue_otp(code.clone(), expires_at);
        self.repos.accounts().update(account).await?;

        info!(email, "Registration code reissued");
        self.dispatch_code(email, &code).await;
        Ok(())
    }

    /// Authenticate with email and password.
    ///
    /// Admins may log in before verifying their email; everyone else
    /// must be verified. Disabled accounts are rejected outright.
    pub async fn login(&self, email: &str, secret: &str) -> DomainResult<Session> {
        let account = self.find_account(email).await?;

        let Some(stored) = account.password_hash.clone() else {
            return Err(DomainError::NotVerified(format!(
                "Account {} has no password set",
                email
            )));
        };
        if !account.is_verified && !account.is_admin() {
            return Err(DomainError::NotVerified(format!(
                "Account {} has not verified its email",
                email
            )));
        }
        if !account.is_active {
            return Err(DomainError::Unauthorized(format!(
                "Account {} is disabled",
                email
            )));
        }
        if !crypto::verify_password(&stored, secret, self.config.pbkdf2_iterations) {
            return Err(DomainError::Mismatch("wrong credentials".to_string()));
        }

        info!(email, "Login successful");
        self.issue_session(account)
    }

    async fn find_account(&self, email: &str) -> DomainResult<Account> {
        self.repos
            .accounts()
            .find_by_email(email)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Account",
                field: "email",
                value: email.to_string(),
            })
    }

    fn issue_session(&self, account: Account) -> DomainResult<Session> {
        let token = crypto::create_token(
            &account.id,
            &account.email,
            account.role.as_str(),
            &self.config.jwt,
        )
        .map_err(|e| DomainError::Storage(format!("Token error: {}", e)))?;
        Ok(Session { token, account })
    }

    /// Delivery failures are logged, never surfaced to the caller.
    async fn dispatch_code(&self, email: &str, code: &str) {
        if let Err(e) = self.sink.send(email, code).await {
            warn!(email, error = %e, "Failed to dispatch one-time code");
        }
    }
}

/// Constant-time code comparison; unequal lengths never match.
fn codes_match(stored: &str, supplied: &str) -> bool {
    stored.len() == supplied.len()
        && stored.as_bytes().ct_eq(supplied.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::otp::testing::FixedOtpGenerator;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use crate::infrastructure::notify::testing::CapturingOtpSink;

    fn test_config() -> RegistrationConfig {
        RegistrationConfig {
            otp_ttl_minutes: 10,
            // Low count keeps tests fast
            pbkdf2_iterations: 1000,
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "evslot-service".to_string(),
            },
        }
    }

    struct Harness {
        repos: Arc<InMemoryRepositoryProvider>,
        sink: Arc<CapturingOtpSink>,
        service: RegistrationService,
    }

    fn harness(codes: &[&str]) -> Harness {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let sink = Arc::new(CapturingOtpSink::default());
        let service = RegistrationService::new(
            repos.clone(),
            sink.clone(),
            Arc::new(FixedOtpGenerator::new(codes)),
            test_config(),
        );
        Harness {
            repos,
            sink,
            service,
        }
    }

    #[tokio::test]
    async fn full_activation_flow() {
        let h = harness(&["123456"]);

        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();

        // Wrong code first
        let err = h.service.verify_otp("a@x.com", "000000").await.unwrap_err();
        assert!(matches!(err, DomainError::Mismatch(_)));

        h.service.verify_otp("a@x.com", "123456").await.unwrap();

        // Short password rejected
        let err = h
            .service
            .set_password("a@x.com", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::WeakSecret(_)));

        let session = h.service.set_password("a@x.com", "secret123").await.unwrap();
        assert!(!session.token.is_empty());
        assert!(session.account.is_activated());

        // And login works with the same credential
        let session = h.service.login("a@x.com", "secret123").await.unwrap();
        assert_eq!(session.account.email, "a@x.com");
    }

    #[tokio::test]
    async fn re_register_is_idempotent_and_last_code_wins() {
        let h = harness(&["111111", "222222"]);

        h.service
            .register("a@x.com", "Alice", "+998901111111")
            .await
            .unwrap();
        h.service
            .register("a@x.com", "Alicia", "+998902222222")
            .await
            .unwrap();

        // Still one account, with updated details
        assert_eq!(h.repos.accounts().count().await.unwrap(), 1);
        let account = h
            .repos
            .accounts()
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.name, "Alicia");
        assert_eq!(account.phone, "+998902222222");

        // The first code is dead
        let err = h.service.verify_otp("a@x.com", "111111").await.unwrap_err();
        assert!(matches!(err, DomainError::Mismatch(_)));
        h.service.verify_otp("a@x.com", "222222").await.unwrap();

        assert_eq!(h.sink.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn register_conflicts_once_active() {
        let h = harness(&["123456"]);
        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();
        h.service.verify_otp("a@x.com", "123456").await.unwrap();
        h.service.set_password("a@x.com", "secret123").await.unwrap();

        let err = h
            .service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn otp_expiry_boundary() {
        let h = harness(&["123456"]);
        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();

        // Just inside the window: fine
        let mut account = h
            .repos
            .accounts()
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        account.otp_expires_at = Some(Utc::now() + Duration::seconds(1));
        h.repos.accounts().update(account.clone()).await.unwrap();
        h.service.verify_otp("a@x.com", "123456").await.unwrap();

        // Reset and push past the deadline: expired
        account.is_verified = false;
        account.otp_code = Some("123456".to_string());
        account.otp_expires_at = Some(Utc::now() - Duration::seconds(1));
        h.repos.accounts().update(account).await.unwrap();
        let err = h.service.verify_otp("a@x.com", "123456").await.unwrap_err();
        assert!(matches!(err, DomainError::Expired(_)));
    }

    #[tokio::test]
    async fn resend_replaces_the_code() {
        let h = harness(&["111111", "222222"]);
        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();
        h.service.resend_otp("a@x.com").await.unwrap();

        let err = h.service.verify_otp("a@x.com", "111111").await.unwrap_err();
        assert!(matches!(err, DomainError::Mismatch(_)));
        h.service.verify_otp("a@x.com", "222222").await.unwrap();
    }

    #[tokio::test]
    async fn set_password_requires_verification() {
        let h = harness(&["123456"]);
        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();

        let err = h
            .service
            .set_password("a@x.com", "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotVerified(_)));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_account() {
        let h = harness(&["123456"]);
        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();
        h.service.verify_otp("a@x.com", "123456").await.unwrap();
        h.service.set_password("a@x.com", "secret123").await.unwrap();

        let err = h.service.login("a@x.com", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, DomainError::Mismatch(_)));

        let err = h.service.login("b@x.com", "secret123").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn admin_logs_in_without_verification() {
        let h = harness(&["123456"]);

        // Seeded admin: credential set, never verified
        let mut admin = Account::pending(
            "admin@x.com",
            "Admin",
            "+998900000000",
            "000000",
            Utc::now(),
        );
        admin.role = crate::domain::AccountRole::Admin;
        admin.password_hash = Some(crypto::hash_password("admin-pass", 1000));
        admin.otp_code = None;
        admin.otp_expires_at = None;
        h.repos.accounts().save(admin).await.unwrap();

        let session = h.service.login("admin@x.com", "admin-pass").await.unwrap();
        assert!(session.account.is_admin());

        // A plain user in the same state is rejected
        let mut user = Account::pending(
            "user@x.com",
            "User",
            "+998900000001",
            "000000",
            Utc::now(),
        );
        user.password_hash = Some(crypto::hash_password("user-pass", 1000));
        h.repos.accounts().save(user).await.unwrap();
        let err = h.service.login("user@x.com", "user-pass").await.unwrap_err();
        assert!(matches!(err, DomainError::NotVerified(_)));
    }

    #[tokio::test]
    async fn disabled_account_cannot_log_in() {
        let h = harness(&["123456"]);
        h.service
            .register("a@x.com", "Alice", "+998901234567")
            .await
            .unwrap();
        h.service.verify_otp("a@x.com", "123456").await.unwrap();
        h.service.set_password("a@x.com", "secret123").await.unwrap();

        let mut account = h
            .repos
            .accounts()
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        account.is_active = false;
        h.repos.accounts().update(account).await.unwrap();

        let err = h.service.login("a@x.com", "secret123").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
