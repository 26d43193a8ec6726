//! Contact store abstraction.
//!
//! # Responsibilities
//! - Describe the two operations the newsletter needs: insert and exact count
//! - Carry the store's error code and message unchanged to the classifier
//!
//! # Design Decisions
//! - The store is a capability owned by the host and shared via `Arc<dyn ContactStore>`
//! - No retries or timeouts here; callers await exactly once

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Store error code for a unique-constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Row written for each signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub email: String,
    pub source: String,
}

/// Errors reported by a contact store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store answered and refused the operation.
    #[error("store rejected request (HTTP {status}): {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Transport(String),

    /// The store answered with something we could not interpret.
    #[error("unexpected store response: {0}")]
    Protocol(String),

    /// The client could not be built from its configuration.
    #[error("store misconfigured: {0}")]
    Config(String),
}

impl StoreError {
    /// Store-specific error code, when the store supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        match self {
            StoreError::Rejected { message, .. } => message,
            StoreError::Transport(m) | StoreError::Protocol(m) | StoreError::Config(m) => m,
        }
    }

    /// True if the row already exists.
    ///
    /// Either signal is enough: some stores only send the code, others only
    /// mention the violation in the message.
    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(UNIQUE_VIOLATION)
            || self.message().to_lowercase().contains("duplicate")
    }
}

/// Append-only contact store.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Insert one contact row.
    async fn insert(&self, contact: &NewContact) -> Result<(), StoreError>;

    /// Exact number of stored contacts.
    async fn count(&self) -> Result<u64, StoreError>;
}
