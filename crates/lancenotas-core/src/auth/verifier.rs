//! Credential verification capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::professor::Professor;

/// Checks an email/password pair and returns the matching identity.
///
/// Implementations must report a rejected pair as
/// [`crate::LancenotasError::Authentication`] and a transport or service failure
/// as [`crate::LancenotasError::AuthenticationUnavailable`]; the two are never
/// folded together.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<Professor>;
}
