//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::professor::Professor;

/// The authenticated identity of the running client, if any.
///
/// Exactly one session exists per process. It is empty at start-up, filled by a
/// restore or a successful login and emptied again by logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in professor
    pub professor: Option<Professor>,
}

impl Session {
    /// An empty (unauthenticated) session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A session holding `professor`.
    pub fn authenticated(professor: Professor) -> Self {
        Self {
            professor: Some(professor),
        }
    }

    /// True when a professor is present.
    pub fn is_authenticated(&self) -> bool {
        self.professor.is_some()
    }

    pub fn professor(&self) -> Option<&Professor> {
        self.professor.as_ref()
    }
}
