//! Account domain entity

use chrono::{DateTime, Utc};

use crate::shared::time::is_expired;

/// Account capability level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    /// Ordinary end user
    User,
    /// Platform administrator (bypasses email verification on login)
    Admin,
    /// Company operator managing stations
    Operator,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "operator" => Self::Operator,
            _ => Self::User,
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account moving through the registration lifecycle:
/// pending verification → verified → active (credential set).
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID (UUID v4)
    pub id: String,
    /// Unique email address (registration identity)
    pub email: String,
    pub name: String,
    pub phone: String,
    /// Stored as `salt$derivedHex`; set only after verification
    pub password_hash: Option<String>,
    pub is_verified: bool,
    /// Disabled accounts cannot log in
    pub is_active: bool,
    /// Current one-time code, cleared on successful verification
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a fresh account in the pending-verification state.
    pub fn pending(
        email: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        otp_code: impl Into<String>,
        otp_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            phone: phone.into(),
            password_hash: None,
            is_verified: false,
            is_active: true,
            otp_code: Some(otp_code.into()),
            otp_expires_at: Some(otp_expires_at),
            role: AccountRole::User,
            created_at: Utc::now(),
        }
    }

    /// Fully activated: verified and holding a credential.
    pub fn is_activated(&self) -> bool {
        self.is_verified && self.password_hash.is_some()
    }

    /// Waiting on OTP verification with a still-valid code.
    pub fn is_pending(&self) -> bool {
        self.password_hash.is_none()
            && !is_expired(self.otp_expires_at, Utc::now())
    }

    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }

    /// Issue a new one-time code, resetting any previous one.
    pub fn issue_otp(&mut self, code: impl Into<String>, expires_at: DateTime<Utc>) {
        self.otp_code = Some(code.into());
        self.otp_expires_at = Some(expires_at);
    }

    /// Mark the account verified and clear OTP state.
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.otp_code = None;
        self.otp_expires_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_account() -> Account {
        Account::pending(
            "a@x.com",
            "Alice",
            "+998901234567",
            "123456",
            Utc::now() + Duration::minutes(10),
        )
    }

    #[test]
    fn new_account_is_pending() {
        let a = sample_account();
        assert!(a.is_pending());
        assert!(!a.is_activated());
        assert!(!a.is_verified);
        assert_eq!(a.role, AccountRole::User);
    }

    #[test]
    fn verification_clears_otp() {
        let mut a = sample_account();
        a.mark_verified();
        assert!(a.is_verified);
        assert!(a.otp_code.is_none());
        assert!(a.otp_expires_at.is_none());
        // still not activated without a credential
        assert!(!a.is_activated());
    }

    #[test]
    fn activated_requires_verified_and_credential() {
        let mut a = sample_account();
        a.mark_verified();
        a.password_hash = Some("salt$hash".into());
        assert!(a.is_activated());
    }

    #[test]
    fn stale_otp_is_not_pending() {
        let mut a = sample_account();
        a.otp_expires_at = Some(Utc::now() - Duration::minutes(1));
        assert!(!a.is_pending());
    }

    #[test]
    fn issue_otp_replaces_code() {
        let mut a = sample_account();
        let new_expiry = Utc::now() + Duration::minutes(10);
        a.issue_otp("654321", new_expiry);
        assert_eq!(a.otp_code.as_deref(), Some("654321"));
        assert_eq!(a.otp_expires_at, Some(new_expiry));
    }

    #[test]
    fn role_roundtrip() {
        for role in &[AccountRole::User, AccountRole::Admin, AccountRole::Operator] {
            assert_eq!(&AccountRole::from_str(role.as_str()), role);
        }
        assert_eq!(AccountRole::from_str("unknown"), AccountRole::User);
    }
}
