//! Versioned JSON encoding of the values kept in the key-value store.
//!
//! Values written by the browser UI carry no `version` field: the roster was a
//! bare JSON array and the session a bare professor object. Both are read as
//! their 1.0.0 schema. Login accounts never existed there and are always
//! versioned.

use std::collections::HashSet;

use serde_json::Value;
use version_migrate::Migrator;

use lancenotas_core::LancenotasError;
use lancenotas_core::error::Result;
use lancenotas_core::auth::{Account, AccountList};
use lancenotas_core::kv::{ACCOUNTS_KEY, ROSTER_KEY, SESSION_KEY};
use lancenotas_core::professor::Professor;
use lancenotas_core::turma::{Roster, Turma};

use crate::dto::{create_accounts_migrator, create_professor_migrator, create_roster_migrator};

const LEGACY_VERSION: &str = "1.0.0";

/// Encodes and decodes persisted values through their migrators.
pub struct StoreCodec {
    professor_migrator: Migrator,
    roster_migrator: Migrator,
    accounts_migrator: Migrator,
}

impl Default for StoreCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreCodec {
    pub fn new() -> Self {
        Self {
            professor_migrator: create_professor_migrator(),
            roster_migrator: create_roster_migrator(),
            accounts_migrator: create_accounts_migrator(),
        }
    }

    pub fn encode_professor(&self, professor: &Professor) -> Result<Vec<u8>> {
        let json = self
            .professor_migrator
            .save_domain_flat("professor", professor.clone())
            .map_err(|e| LancenotasError::internal(format!("Failed to encode session: {}", e)))?;
        Ok(json.into_bytes())
    }

    pub fn decode_professor(&self, bytes: &[u8]) -> Result<Professor> {
        let mut value: Value = serde_json::from_slice(bytes)
            .map_err(|e| LancenotasError::corrupt_store(SESSION_KEY, e.to_string()))?;

        if let Value::Object(map) = &mut value {
            map.entry("version")
                .or_insert_with(|| Value::String(LEGACY_VERSION.to_string()));
        }

        self.professor_migrator
            .load_flat_from("professor", value)
            .map_err(|e| LancenotasError::corrupt_store(SESSION_KEY, e.to_string()))
    }

    pub fn encode_roster(&self, turmas: &[Turma]) -> Result<Vec<u8>> {
        let json = self
            .roster_migrator
            .save_domain_flat("roster", Roster::new(turmas.to_vec()))
            .map_err(|e| LancenotasError::internal(format!("Failed to encode roster: {}", e)))?;
        Ok(json.into_bytes())
    }

    /// Decodes a roster and checks that ids are unique and names are present.
    pub fn decode_roster(&self, bytes: &[u8]) -> Result<Vec<Turma>> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| LancenotasError::corrupt_store(ROSTER_KEY, e.to_string()))?;

        let value = match value {
            Value::Array(turmas) => serde_json::json!({
                "version": LEGACY_VERSION,
                "turmas": turmas,
            }),
            other => other,
        };

        let roster: Roster = self
            .roster_migrator
            .load_flat_from("roster", value)
            .map_err(|e| LancenotasError::corrupt_store(ROSTER_KEY, e.to_string()))?;

        let turmas = roster.into_turmas();
        check_roster(&turmas)?;
        Ok(turmas)
    }

    pub fn encode_accounts(&self, accounts: &[Account]) -> Result<Vec<u8>> {
        let json = self
            .accounts_migrator
            .save_domain_flat("accounts", AccountList::new(accounts.to_vec()))
            .map_err(|e| LancenotasError::internal(format!("Failed to encode accounts: {}", e)))?;
        Ok(json.into_bytes())
    }

    /// Decodes login accounts and checks that ids and emails are unique.
    pub fn decode_accounts(&self, bytes: &[u8]) -> Result<Vec<Account>> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| LancenotasError::corrupt_store(ACCOUNTS_KEY, e.to_string()))?;

        let list: AccountList = self
            .accounts_migrator
            .load_flat_from("accounts", value)
            .map_err(|e| LancenotasError::corrupt_store(ACCOUNTS_KEY, e.to_string()))?;

        check_accounts(&list.accounts)?;
        Ok(list.accounts)
    }
}

fn check_accounts(accounts: &[Account]) -> Result<()> {
    let mut ids = HashSet::with_capacity(accounts.len());
    let mut emails = HashSet::with_capacity(accounts.len());
    for account in accounts {
        let email = account.professor.normalized_email();
        if email.is_empty() {
            return Err(LancenotasError::corrupt_store(
                ACCOUNTS_KEY,
                format!("account '{}' has no email", account.professor.id),
            ));
        }
        if !ids.insert(account.professor.id.as_str()) {
            return Err(LancenotasError::corrupt_store(
                ACCOUNTS_KEY,
                format!("duplicate account id '{}'", account.professor.id),
            ));
        }
        if !emails.insert(email) {
            return Err(LancenotasError::corrupt_store(
                ACCOUNTS_KEY,
                format!("duplicate account email '{}'", account.professor.email),
            ));
        }
    }
    Ok(())
}

fn check_roster(turmas: &[Turma]) -> Result<()> {
    let mut seen = HashSet::with_capacity(turmas.len());
    for turma in turmas {
        if turma.nome.trim().is_empty() {
            return Err(LancenotasError::corrupt_store(
                ROSTER_KEY,
                format!("turma '{}' has an empty name", turma.id),
            ));
        }
        if !seen.insert(turma.id.as_str()) {
            return Err(LancenotasError::corrupt_store(
                ROSTER_KEY,
                format!("duplicate turma id '{}'", turma.id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lancenotas_core::turma::seed_turmas;

    const NOW: &str = "2024-03-01T12:00:00Z";

    fn demo() -> Professor {
        Professor {
            id: "1".to_string(),
            nome: "Professor Demo".to_string(),
            email: "demo@example.com".to_string(),
            escola: Some("Escola Exemplo".to_string()),
            created_at: NOW.to_string(),
        }
    }

    #[test]
    fn test_professor_roundtrip_is_versioned() {
        let codec = StoreCodec::new();
        let bytes = codec.encode_professor(&demo()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert!(text.contains("\"version\":\"1.0.0\""));
        assert_eq!(codec.decode_professor(&bytes).unwrap(), demo());
    }

    #[test]
    fn test_unversioned_professor_is_read_as_legacy() {
        let codec = StoreCodec::new();
        let legacy = br#"{"id":"1","nome":"Professor Demo","email":"demo@example.com","escola":"Escola Exemplo","created_at":"2024-03-01T12:00:00Z"}"#;

        assert_eq!(codec.decode_professor(legacy).unwrap(), demo());
    }

    #[test]
    fn test_garbage_professor_is_corrupt() {
        let codec = StoreCodec::new();
        let err = codec.decode_professor(b"{not json").unwrap_err();
        assert!(err.is_corrupt_store());

        let err = codec.decode_professor(br#"{"id":"1"}"#).unwrap_err();
        assert!(err.is_corrupt_store());
    }

    #[test]
    fn test_roster_preserves_order() {
        let codec = StoreCodec::new();
        let turmas = seed_turmas(NOW);

        let bytes = codec.encode_roster(&turmas).unwrap();
        assert_eq!(codec.decode_roster(&bytes).unwrap(), turmas);
    }

    #[test]
    fn test_bare_array_roster_is_read_as_legacy() {
        let codec = StoreCodec::new();
        let legacy = r#"[
            {"id":"2","nome":"8º B","disciplina":"","ano_serie":"8º Ano","alunos_count":25,"atividades_count":3,"created_at":"x","updated_at":"x"},
            {"id":"1","nome":"7º A","disciplina":"Matemática","ano_serie":null,"alunos_count":28,"atividades_count":5,"created_at":"x","updated_at":"x"}
        ]"#;

        let turmas = codec.decode_roster(legacy.as_bytes()).unwrap();
        assert_eq!(turmas.len(), 2);
        assert_eq!(turmas[0].id, "2");
        assert_eq!(turmas[0].disciplina, None);
        assert_eq!(turmas[1].disciplina.as_deref(), Some("Matemática"));
        assert_eq!(turmas[1].ano_serie, None);
    }

    #[test]
    fn test_duplicate_ids_are_corrupt() {
        let codec = StoreCodec::new();
        let mut turmas = seed_turmas(NOW);
        turmas[1].id = turmas[0].id.clone();
        let bytes = codec.encode_roster(&turmas).unwrap();

        let err = codec.decode_roster(&bytes).unwrap_err();
        assert!(err.is_corrupt_store());
    }

    fn account(id: &str, email: &str) -> Account {
        let mut professor = demo();
        professor.id = id.to_string();
        professor.email = email.to_string();
        Account::new(professor, "demo123").unwrap()
    }

    #[test]
    fn test_accounts_keep_hashes_not_passwords() {
        let codec = StoreCodec::new();
        let accounts = vec![account("1", "demo@example.com"), account("2", "ana@escola.br")];

        let bytes = codec.encode_accounts(&accounts).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\"version\":\"1.0.0\""));
        assert!(!text.contains("demo123"));

        let decoded = codec.decode_accounts(&bytes).unwrap();
        assert_eq!(decoded, accounts);
        assert!(decoded[1].verify("demo123"));
    }

    #[test]
    fn test_accounts_with_case_variant_emails_are_corrupt() {
        let codec = StoreCodec::new();
        let accounts = vec![account("1", "ana@escola.br"), account("2", " ANA@escola.br")];
        let bytes = codec.encode_accounts(&accounts).unwrap();

        let err = codec.decode_accounts(&bytes).unwrap_err();
        assert!(err.is_corrupt_store());
    }

    #[test]
    fn test_unversioned_accounts_are_corrupt() {
        let codec = StoreCodec::new();
        let err = codec.decode_accounts(br#"{"accounts":[]}"#).unwrap_err();
        assert!(err.is_corrupt_store());
        assert!(codec.decode_accounts(b"[]").unwrap_err().is_corrupt_store());
    }

    #[test]
    fn test_non_roster_json_is_corrupt() {
        let codec = StoreCodec::new();
        assert!(codec.decode_roster(b"42").unwrap_err().is_corrupt_store());
        assert!(codec.decode_roster(b"").unwrap_err().is_corrupt_store());
    }
}
