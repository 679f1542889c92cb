//! Professor domain model.

use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

/// An authenticated teacher.
///
/// `email` is the login key and is compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "professor")]
pub struct Professor {
    /// Opaque stable identifier
    pub id: String,
    /// Display name
    pub nome: String,
    /// Login email
    pub email: String,
    /// School the professor teaches at, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escola: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Professor {
    /// Returns the email in the form used as a lookup key.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Lower-cases and trims an email for case-insensitive comparison.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
