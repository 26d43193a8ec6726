//! Signup attempt and its status machine.

use serde::{Deserialize, Serialize};

use crate::config::NewsletterConfig;
use crate::signup::store::StoreError;

/// Lifecycle of one signup attempt.
///
/// Transitions only move forward:
/// `Idle → Pending → {Succeeded | DuplicateRejected | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStatus {
    Idle,
    Pending,
    Succeeded,
    DuplicateRejected,
    Failed,
}

impl SignupStatus {
    /// Whether the user sees a confirmation. Duplicates read as success.
    pub fn is_confirmation(self) -> bool {
        matches!(self, SignupStatus::Succeeded | SignupStatus::DuplicateRejected)
    }

    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            SignupStatus::Idle => "idle",
            SignupStatus::Pending => "pending",
            SignupStatus::Succeeded => "succeeded",
            SignupStatus::DuplicateRejected => "duplicate",
            SignupStatus::Failed => "failed",
        }
    }
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Map a store result onto the terminal status it leads to.
pub fn classify(result: &Result<(), StoreError>) -> SignupStatus {
    match result {
        Ok(()) => SignupStatus::Succeeded,
        Err(e) if e.is_unique_violation() => SignupStatus::DuplicateRejected,
        Err(_) => SignupStatus::Failed,
    }
}

/// One newsletter submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupAttempt {
    normalized_email: String,
    status: SignupStatus,
    message: Option<String>,
}

impl SignupAttempt {
    /// A fresh attempt in `Idle`.
    pub fn new(raw_email: impl AsRef<str>) -> Self {
        Self {
            normalized_email: normalize_email(raw_email.as_ref()),
            status: SignupStatus::Idle,
            message: None,
        }
    }

    /// Move `Idle → Pending`.
    ///
    /// Returns false, leaving the attempt untouched, when the email is blank
    /// or the attempt already left `Idle`.
    pub fn begin(&mut self) -> bool {
        if self.status != SignupStatus::Idle || self.normalized_email.is_empty() {
            return false;
        }
        self.status = SignupStatus::Pending;
        self.message = None;
        true
    }

    /// Move `Pending` to its terminal status. No-op in any other status.
    pub fn resolve(&mut self, result: &Result<(), StoreError>, messages: &NewsletterConfig) {
        if self.status != SignupStatus::Pending {
            return;
        }
        self.status = classify(result);
        self.message = Some(match self.status {
            SignupStatus::Succeeded => messages.success_message.clone(),
            SignupStatus::DuplicateRejected => messages.duplicate_message.clone(),
            _ => messages.failure_message.clone(),
        });
    }

    pub fn normalized_email(&self) -> &str {
        &self.normalized_email
    }

    pub fn status(&self) -> SignupStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
