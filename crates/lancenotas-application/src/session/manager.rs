use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{info, warn};

use lancenotas_core::LancenotasError;
use lancenotas_core::auth::{CredentialVerifier, MSG_MISSING_FIELDS};
use lancenotas_core::error::Result;
use lancenotas_core::kv::{KeyValueStore, SESSION_KEY};
use lancenotas_core::professor::Professor;
use lancenotas_core::session::Session;
use lancenotas_infrastructure::StoreCodec;

/// Owns the authenticated-identity lifecycle of one client process.
///
/// `SessionManager` is responsible for:
/// - Restoring a persisted identity on startup
/// - Logging in through a [`CredentialVerifier`]
/// - Persisting and clearing the identity
///
/// Construct it once and share it by `Arc`.
pub struct SessionManager {
    /// Currently logged-in professor
    current: RwLock<Option<Professor>>,
    /// True until `restore` has finished
    restoring: AtomicBool,
    store: Arc<dyn KeyValueStore>,
    verifier: Arc<dyn CredentialVerifier>,
    codec: StoreCodec,
}

impl SessionManager {
    /// Creates a manager with an empty session that reports `is_restoring()`.
    pub fn new(store: Arc<dyn KeyValueStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            current: RwLock::new(None),
            restoring: AtomicBool::new(true),
            store,
            verifier,
            codec: StoreCodec::new(),
        }
    }

    /// Loads the persisted identity, if any.
    ///
    /// Never fails: an absent key, a read error or undecodable bytes all give an
    /// empty session.
    pub fn restore(&self) -> Session {
        let restored = match self.store.get(SESSION_KEY) {
            Ok(Some(bytes)) => match self.codec.decode_professor(&bytes) {
                Ok(professor) => Some(professor),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable persisted session");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session");
                None
            }
        };

        if let Some(professor) = &restored {
            info!(professor_id = %professor.id, "Restored session");
        }

        *self.current.write() = restored.clone();
        self.restoring.store(false, Ordering::Release);

        Session {
            professor: restored,
        }
    }

    /// Verifies the credentials and makes the returned identity current.
    ///
    /// # Errors
    ///
    /// - `Authentication` with `MissingFields` for blank input (the verifier is not called)
    /// - `Authentication` with `InvalidCredentials` when the verifier rejects the pair
    /// - `AuthenticationUnavailable` when the verifier cannot be reached
    /// - Store errors when the identity cannot be persisted
    ///
    /// The session is unchanged on every error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Professor> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(LancenotasError::missing_fields(MSG_MISSING_FIELDS));
        }

        let professor = match self.verifier.verify(email.trim(), password).await {
            Ok(professor) => professor,
            Err(e) => {
                if e.is_unavailable() {
                    warn!(error = %e, "Credential verifier unavailable");
                } else {
                    info!(reason = ?e.auth_failure(), "Login rejected");
                }
                return Err(e);
            }
        };

        let bytes = self.codec.encode_professor(&professor)?;
        self.store.set(SESSION_KEY, &bytes)?;
        *self.current.write() = Some(professor.clone());

        info!(professor_id = %professor.id, "Logged in");
        Ok(professor)
    }

    /// Clears the in-memory identity and the persisted session. Idempotent.
    pub fn logout(&self) -> Result<()> {
        let previous = self.current.write().take();
        self.store.remove(SESSION_KEY)?;

        match previous {
            Some(professor) => info!(professor_id = %professor.id, "Logged out"),
            None => info!("Logout without an active session"),
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn current(&self) -> Option<Professor> {
        self.current.read().clone()
    }

    pub fn session(&self) -> Session {
        Session {
            professor: self.current(),
        }
    }

    /// True from construction until the first `restore` returns.
    pub fn is_restoring(&self) -> bool {
        self.restoring.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lancenotas_core::AuthFailure;
    use lancenotas_core::auth::{DEMO_EMAIL, DEMO_PASSWORD, UserDirectory};
    use lancenotas_infrastructure::InMemoryKeyValueStore;
    use std::sync::atomic::AtomicUsize;

    /// Counts calls before delegating to the demo directory.
    struct CountingVerifier {
        calls: AtomicUsize,
        inner: UserDirectory,
    }

    impl CountingVerifier {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                inner: UserDirectory::with_demo_account().unwrap(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CredentialVerifier for CountingVerifier {
        async fn verify(&self, email: &str, password: &str) -> Result<Professor> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(email, password).await
        }
    }

    struct UnreachableVerifier;

    #[async_trait]
    impl CredentialVerifier for UnreachableVerifier {
        async fn verify(&self, _email: &str, _password: &str) -> Result<Professor> {
            Err(LancenotasError::unavailable("connection refused"))
        }
    }

    fn manager_over(store: Arc<InMemoryKeyValueStore>) -> SessionManager {
        SessionManager::new(store, Arc::new(UserDirectory::with_demo_account().unwrap()))
    }

    #[tokio::test]
    async fn test_demo_login_authenticates() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let manager = manager_over(store.clone());
        manager.restore();

        let professor = manager.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(professor.nome, "Professor Demo");
        assert_eq!(professor.email, "demo@example.com");
        assert!(manager.is_authenticated());
        assert_eq!(manager.current(), Some(professor));
        assert!(store.get(SESSION_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_empty() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let manager = manager_over(store.clone());
        manager.restore();

        let err = manager.login(DEMO_EMAIL, "wrong").await.unwrap_err();

        assert_eq!(err.auth_failure(), Some(AuthFailure::InvalidCredentials));
        assert!(!manager.is_authenticated());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_identity() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let manager = manager_over(store);
        manager.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert!(manager.login(DEMO_EMAIL, "wrong").await.is_err());
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_fields_skip_the_verifier() {
        let verifier = Arc::new(CountingVerifier::new());
        let manager = SessionManager::new(Arc::new(InMemoryKeyValueStore::new()), verifier.clone());

        for (email, password) in [("", "demo123"), ("   ", "demo123"), (DEMO_EMAIL, "")] {
            let err = manager.login(email, password).await.unwrap_err();
            assert_eq!(err.auth_failure(), Some(AuthFailure::MissingFields));
            assert_eq!(err.user_message(), MSG_MISSING_FIELDS);
        }
        assert_eq!(verifier.calls(), 0);

        manager.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert_eq!(verifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_verifier_is_distinct() {
        let manager = SessionManager::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(UnreachableVerifier),
        );

        let err = manager.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap_err();

        assert!(err.is_unavailable());
        assert!(!err.is_authentication());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let first = manager_over(store.clone());
        let professor = first.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        let second = manager_over(store);
        let session = second.restore();

        assert!(session.is_authenticated());
        assert_eq!(session.professor(), Some(&professor));
        assert!(second.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_then_restore_is_empty() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let first = manager_over(store.clone());
        first.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        first.logout().unwrap();
        assert!(!first.is_authenticated());

        let second = manager_over(store);
        assert!(!second.restore().is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let manager = manager_over(Arc::new(InMemoryKeyValueStore::new()));
        manager.logout().unwrap();
        manager.logout().unwrap();
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_malformed_session_restores_empty() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set(SESSION_KEY, b"{\"id\": 7").unwrap();

        let manager = manager_over(store);
        assert!(manager.is_restoring());

        let session = manager.restore();
        assert!(!session.is_authenticated());
        assert!(!manager.is_restoring());
    }

    #[test]
    fn test_legacy_browser_session_restores() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store
            .set(
                SESSION_KEY,
                br#"{"id":"1","nome":"Professor Demo","email":"demo@example.com","escola":"Escola Exemplo","created_at":"2024-01-01T00:00:00.000Z"}"#,
            )
            .unwrap();

        let manager = manager_over(store);
        let session = manager.restore();
        assert_eq!(session.professor().map(|p| p.id.as_str()), Some("1"));
    }
}
