/// Account model
///
/// An account is a registered identity: a display name, a unique email used as
/// the login identifier, and an Argon2id password hash.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(100) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `Account` does not implement `Serialize`. Anything leaving the process goes
/// through [`AccountResponse`], which has no password field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted account, including its password hash
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID, assigned on creation
    pub id: Uuid,

    /// Display name
    pub username: String,

    /// Login identifier, unique across all accounts (stored normalized)
    pub email: String,

    /// Argon2id password hash in PHC string format
    pub password_hash: String,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

/// Input for persisting a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name
    pub username: String,

    /// Normalized email (see [`normalize_email`])
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

/// Outward-facing account shape
///
/// Used for every HTTP response that carries an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

/// Normalizes an email address for storage and comparison
///
/// Trims surrounding whitespace and lowercases. Registration and login both
/// go through this, so `Alice@X.com` and `alice@x.com` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$salt$hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_account_response_omits_password_hash() {
        let account = sample_account();
        let response = AccountResponse::from(&account);

        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("password_hash"));
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["id"], account.id.to_string());
    }

    #[test]
    fn test_account_response_from_owned() {
        let account = sample_account();
        let id = account.id;
        let response: AccountResponse = account.into();
        assert_eq!(response.id, id);
    }
}
