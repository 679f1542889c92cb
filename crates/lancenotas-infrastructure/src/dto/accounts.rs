//! Login account DTOs and migrations
//!
//! All accounts are one persisted value.
//!
//! ## Version History
//! - **1.0.0**: Initial schema (professor fields plus an Argon2 `password_hash`)

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use lancenotas_core::auth::{Account, AccountList};
use lancenotas_core::professor::Professor;

/// Account entry V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountV1_0_0 {
    pub id: String,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escola: Option<String>,
    pub created_at: String,
    pub password_hash: String,
}

/// Account list V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AccountsV1_0_0 {
    #[serde(default)]
    pub accounts: Vec<AccountV1_0_0>,
}

/// Type alias for the latest accounts version.
pub type AccountsDTO = AccountsV1_0_0;

impl From<AccountV1_0_0> for Account {
    fn from(dto: AccountV1_0_0) -> Self {
        Account {
            professor: Professor {
                id: dto.id,
                nome: dto.nome,
                email: dto.email,
                escola: dto.escola,
                created_at: dto.created_at,
            },
            password_hash: dto.password_hash,
        }
    }
}

impl From<Account> for AccountV1_0_0 {
    fn from(account: Account) -> Self {
        let Account {
            professor,
            password_hash,
        } = account;
        AccountV1_0_0 {
            id: professor.id,
            nome: professor.nome,
            email: professor.email,
            escola: professor.escola,
            created_at: professor.created_at,
            password_hash,
        }
    }
}

impl IntoDomain<AccountList> for AccountsV1_0_0 {
    fn into_domain(self) -> AccountList {
        AccountList::new(self.accounts.into_iter().map(Account::from).collect())
    }
}

impl FromDomain<AccountList> for AccountsV1_0_0 {
    fn from_domain(list: AccountList) -> Self {
        AccountsV1_0_0 {
            accounts: list.accounts.into_iter().map(AccountV1_0_0::from).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the login accounts.
pub fn create_accounts_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("accounts" => [
        AccountsV1_0_0,
        AccountList
    ], save = true)
    .expect("Failed to create accounts migrator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_flat_load() {
        let migrator = create_accounts_migrator();
        let value = serde_json::json!({
            "version": "1.0.0",
            "accounts": [{
                "id": "1",
                "nome": "Professor Demo",
                "email": "demo@example.com",
                "created_at": "2024-01-01T00:00:00Z",
                "password_hash": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA"
            }]
        });

        let list: AccountList = migrator.load_flat_from("accounts", value).unwrap();
        assert_eq!(list.accounts.len(), 1);
        assert_eq!(list.accounts[0].professor.email, "demo@example.com");
        assert_eq!(list.accounts[0].professor.escola, None);
        assert!(list.accounts[0].password_hash.starts_with("$argon2id"));
    }
}
