//! [`CredentialVerifier`] backed by a remote `POST /api/login`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use lancenotas_core::LancenotasError;
use lancenotas_core::auth::{
    AuthResponse, CredentialVerifier, LoginRequest, MSG_INVALID_CREDENTIALS, MSG_MISSING_FIELDS,
};
use lancenotas_core::error::Result;
use lancenotas_core::professor::Professor;

/// Calls the login endpoint of a Lancenotas server.
///
/// In-body rejections become `Authentication` errors. Anything that keeps the
/// endpoint from answering (connection, non-2xx status, undecodable body)
/// becomes `AuthenticationUnavailable`.
#[derive(Debug, Clone)]
pub struct HttpCredentialVerifier {
    client: Client,
    login_url: String,
}

impl HttpCredentialVerifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LancenotasError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            login_url: format!("{}/api/login", base_url.trim_end_matches('/')),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait]
impl CredentialVerifier for HttpCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> Result<Professor> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let res = self
            .client
            .post(&self.login_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.login_url, error = %e, "Login request failed");
                LancenotasError::unavailable(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(url = %self.login_url, %status, "Login endpoint returned an error status");
            return Err(LancenotasError::unavailable(format!(
                "login endpoint returned {}",
                status
            )));
        }

        let body: AuthResponse = res
            .json()
            .await
            .map_err(|e| LancenotasError::unavailable(format!("invalid login response: {}", e)))?;

        interpret_response(body)
    }
}

fn interpret_response(body: AuthResponse) -> Result<Professor> {
    match (body.success, body.professor) {
        (true, Some(professor)) => Ok(professor),
        (true, None) => Err(LancenotasError::unavailable(
            "login response has no professor",
        )),
        (false, _) => {
            let message = body
                .message
                .unwrap_or_else(|| MSG_INVALID_CREDENTIALS.to_string());
            if message == MSG_MISSING_FIELDS {
                Err(LancenotasError::missing_fields(message))
            } else {
                Err(LancenotasError::invalid_credentials(message))
            }
        }
    }
}
