//! Credential table keyed by normalized email.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use super::account::{Account, NewProfessor};
use super::verifier::CredentialVerifier;
use super::wire::{MSG_INVALID_CREDENTIALS, MSG_MISSING_FIELDS};
use crate::error::{LancenotasError, Result};
use crate::professor::{Professor, normalize_email};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";

pub const MSG_DUPLICATE_EMAIL: &str = "Já existe um professor com esse email.";

/// The accounts allowed to log in.
///
/// Backs the login endpoint and doubles as an offline [`CredentialVerifier`].
/// Passwords are only held as Argon2 hashes.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    accounts: BTreeMap<String, Account>,
}

impl UserDirectory {
    /// Creates an empty directory.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a directory from persisted accounts. A later duplicate email wins.
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        let mut directory = Self::empty();
        for account in accounts {
            directory.insert(account);
        }
        directory
    }

    /// The seed account `demo@example.com` / `demo123`.
    pub fn demo_account() -> Result<Account> {
        Account::new(
            Professor {
                id: "1".to_string(),
                nome: "Professor Demo".to_string(),
                email: DEMO_EMAIL.to_string(),
                escola: Some("Escola Exemplo".to_string()),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
            DEMO_PASSWORD,
        )
    }

    /// Creates a directory holding only the demo account.
    pub fn with_demo_account() -> Result<Self> {
        Ok(Self::from_accounts(vec![Self::demo_account()?]))
    }

    /// Adds or replaces an account.
    pub fn insert(&mut self, account: Account) {
        self.accounts
            .insert(account.professor.normalized_email(), account);
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.accounts.contains_key(&normalize_email(email))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts ordered by id, for persisting.
    pub fn to_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by_key(|a| numeric_id(&a.professor.id));
        accounts
    }

    /// Adds a professor account.
    ///
    /// The email is stored trimmed and lower-cased; the password is hashed.
    ///
    /// # Errors
    ///
    /// `Validation` when a field is blank or the email is already registered.
    pub fn register(&mut self, new: NewProfessor) -> Result<Professor> {
        let nome = new.nome.trim();
        let email = normalize_email(&new.email);
        if nome.is_empty() || email.is_empty() || new.password.is_empty() {
            return Err(LancenotasError::validation(
                "Nome, email e senha são obrigatórios",
            ));
        }
        if self.accounts.contains_key(&email) {
            return Err(LancenotasError::validation(MSG_DUPLICATE_EMAIL));
        }

        let professor = Professor {
            id: self.next_id(),
            nome: nome.to_string(),
            email,
            escola: new
                .escola
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.insert(Account::new(professor.clone(), &new.password)?);
        Ok(professor)
    }

    /// Checks a credential pair.
    ///
    /// Blank input is reported as [`crate::AuthFailure::MissingFields`]; an unknown
    /// email and a wrong password share one message so the response does not
    /// reveal which accounts exist.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Professor> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(LancenotasError::missing_fields(MSG_MISSING_FIELDS));
        }

        match self.accounts.get(&normalize_email(email)) {
            Some(account) if account.verify(password) => Ok(account.professor.clone()),
            _ => {
                debug!("credential check rejected");
                Err(LancenotasError::invalid_credentials(MSG_INVALID_CREDENTIALS))
            }
        }
    }

    /// One past the largest numeric id.
    fn next_id(&self) -> String {
        let max = self
            .accounts
            .values()
            .filter_map(|a| a.professor.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

fn numeric_id(id: &str) -> (u64, String) {
    (id.parse().unwrap_or(u64::MAX), id.to_string())
}

#[async_trait]
impl CredentialVerifier for UserDirectory {
    async fn verify(&self, email: &str, password: &str) -> Result<Professor> {
        self.authenticate(email, password)
    }
}
