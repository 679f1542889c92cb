//! Error types for Lancenotas.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a credential check was rejected.
///
/// Kept separate from [`LancenotasError::AuthenticationUnavailable`] so a UI can
/// tell "wrong password" apart from "service unreachable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailure {
    /// Email or password was blank.
    MissingFields,
    /// No account matches the email/password pair.
    InvalidCredentials,
}

/// A shared error type for every Lancenotas crate.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LancenotasError {
    /// Bad caller input (e.g. a turma without a name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials were checked and rejected.
    #[error("Authentication failed: {message}")]
    Authentication { reason: AuthFailure, message: String },

    /// The credential verifier could not be reached or answered garbage.
    #[error("Authentication service unavailable: {0}")]
    AuthenticationUnavailable(String),

    /// A persisted value exists but cannot be decoded.
    #[error("Corrupt store value under '{key}': {message}")]
    CorruptStore { key: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LancenotasError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Authentication error for blank email or password
    pub fn missing_fields(message: impl Into<String>) -> Self {
        Self::Authentication {
            reason: AuthFailure::MissingFields,
            message: message.into(),
        }
    }

    /// Creates an Authentication error for a rejected email/password pair
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::Authentication {
            reason: AuthFailure::InvalidCredentials,
            message: message.into(),
        }
    }

    /// Creates an AuthenticationUnavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::AuthenticationUnavailable(message.into())
    }

    /// Creates a CorruptStore error
    pub fn corrupt_store(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptStore {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Returns the rejection reason if this is an Authentication error.
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            Self::Authentication { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Check if this is an Authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Check if this is an AuthenticationUnavailable error
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::AuthenticationUnavailable(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a CorruptStore error
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, Self::CorruptStore { .. })
    }

    /// Message suitable for showing to the professor.
    ///
    /// Authentication failures show the verifier's own wording; an unreachable
    /// verifier never reuses that wording.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message, .. } => message.clone(),
            Self::AuthenticationUnavailable(_) => {
                "Serviço de autenticação indisponível. Tente novamente mais tarde.".to_string()
            }
            Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LancenotasError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LancenotasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LancenotasError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LancenotasError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at binary boundaries)
impl From<anyhow::Error> for LancenotasError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, LancenotasError>`.
pub type Result<T> = std::result::Result<T, LancenotasError>;
