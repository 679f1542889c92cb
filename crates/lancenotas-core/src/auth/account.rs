//! Login accounts: a professor plus a password hash.

use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use super::password::{hash_password, verify_password};
use crate::error::Result;
use crate::professor::Professor;

/// A professor who can log in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub professor: Professor,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl Account {
    /// Builds an account, hashing `password`.
    pub fn new(professor: Professor, password: &str) -> Result<Self> {
        Ok(Self {
            professor,
            password_hash: hash_password(password)?,
        })
    }

    pub fn verify(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("professor", &self.professor)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// All accounts as persisted under one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "accounts")]
pub struct AccountList {
    pub accounts: Vec<Account>,
}

impl AccountList {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

/// Input of `UserDirectory::register`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfessor {
    pub nome: String,
    pub email: String,
    pub password: String,
    pub escola: Option<String>,
}
