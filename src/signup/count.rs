//! Shared waitlist count snapshot.

use std::sync::Mutex;

use crate::signup::submitter::SignupSubmitter;

/// Optional, non-authoritative number of registered emails.
///
/// Seeded once from the store, then bumped locally after each fresh signup.
#[derive(Debug, Default)]
pub struct WaitlistCount {
    value: Mutex<Option<u64>>,
}

impl WaitlistCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<u64> {
        *self.value.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn set(&self, count: u64) {
        *self.value.lock().unwrap_or_else(|p| p.into_inner()) = Some(count);
    }

    /// Add one if a count is known; an unknown count stays unknown.
    pub fn increment_if_known(&self) {
        let mut value = self.value.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(n) = value.as_mut() {
            *n += 1;
        }
    }

    /// Load the count from the store. Failures leave the snapshot untouched.
    pub async fn refresh(&self, submitter: &SignupSubmitter) {
        if let Some(n) = submitter.load_count().await {
            self.set(n);
            tracing::info!(count = n, "Waitlist count loaded");
        }
    }
}
