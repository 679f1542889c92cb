//! Wire types shared by the login endpoint and its clients.

use serde::{Deserialize, Serialize};

use crate::error::LancenotasError;
use crate::professor::Professor;

pub const MSG_MISSING_FIELDS: &str = "Email e senha são obrigatórios";
pub const MSG_INVALID_CREDENTIALS: &str = "Email ou senha inválidos";
pub const MSG_LOGIN_OK: &str = "Login realizado com sucesso";
pub const MSG_LOGOUT_OK: &str = "Logout realizado com sucesso";

/// Body of `POST /api/login`.
///
/// Missing fields deserialize as empty strings so the handler can answer with
/// the "required fields" message instead of a transport-level rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned by `/api/login` and `/api/logout`.
///
/// Failures are signalled in-body; the HTTP status is always 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<Professor>,
}

impl AuthResponse {
    pub fn logged_in(professor: Professor) -> Self {
        Self {
            success: true,
            message: Some(MSG_LOGIN_OK.to_string()),
            professor: Some(professor),
        }
    }

    pub fn logged_out() -> Self {
        Self {
            success: true,
            message: Some(MSG_LOGOUT_OK.to_string()),
            professor: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            professor: None,
        }
    }
}

impl From<Result<Professor, LancenotasError>> for AuthResponse {
    fn from(result: Result<Professor, LancenotasError>) -> Self {
        match result {
            Ok(professor) => Self::logged_in(professor),
            Err(err) => Self::failure(err.user_message()),
        }
    }
}
