//! Newsletter submission against the contact store.
//!
//! # Responsibilities
//! - Normalize the email and issue exactly one insert per attempt
//! - Classify the store answer (success / duplicate / failure)
//! - Host one interactive form: single-flight guard, reset on success,
//!   optimistic count, no-op resolution after teardown
//!
//! # Design Decisions
//! - No store error escapes; every outcome becomes a `SignupStatus`
//! - The single-flight guard is the status enum; the form's lock is never
//!   held across the store call
//! - No retry, no timeout, no cancellation once the insert is issued

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::config::NewsletterConfig;
use crate::observability::metrics;
use crate::signup::count::WaitlistCount;
use crate::signup::store::{ContactStore, NewContact, StoreError};
use crate::signup::types::{SignupAttempt, SignupStatus};

/// Runs signup attempts against a contact store.
#[derive(Clone)]
pub struct SignupSubmitter {
    store: Arc<dyn ContactStore>,
    source: String,
    messages: NewsletterConfig,
}

impl SignupSubmitter {
    /// Create a submitter tagging every row with `source`.
    pub fn new(store: Arc<dyn ContactStore>, source: impl Into<String>, messages: NewsletterConfig) -> Self {
        Self {
            store,
            source: source.into(),
            messages,
        }
    }

    pub fn messages(&self) -> &NewsletterConfig {
        &self.messages
    }

    /// Insert an already-normalized email. The single suspension point of an attempt.
    pub async fn send(&self, normalized_email: &str) -> Result<(), StoreError> {
        let contact = NewContact {
            email: normalized_email.to_string(),
            source: self.source.clone(),
        };
        let start = Instant::now();
        let result = self.store.insert(&contact).await;
        metrics::record_store_call("insert", start);
        result
    }

    /// Insert a pending attempt and settle it.
    ///
    /// Runs to completion once started; callers that must survive their own
    /// cancellation spawn this onto its own task.
    pub async fn complete(&self, mut attempt: SignupAttempt, waitlist: &WaitlistCount) -> SignupAttempt {
        let result = self.send(attempt.normalized_email()).await;
        self.settle(&mut attempt, &result, waitlist);
        attempt
    }

    /// Resolve a pending attempt, logging and counting the outcome.
    ///
    /// A fresh signup bumps `waitlist` when its value is known.
    pub fn settle(&self, attempt: &mut SignupAttempt, result: &Result<(), StoreError>, waitlist: &WaitlistCount) {
        attempt.resolve(result, &self.messages);
        let status = attempt.status();
        metrics::record_signup(status.as_str());

        match (status, result) {
            (SignupStatus::Failed, Err(e)) => {
                tracing::warn!(email = %attempt.normalized_email(), error = %e, "Signup failed");
            }
            (SignupStatus::DuplicateRejected, _) => {
                tracing::info!(email = %attempt.normalized_email(), "Email already registered");
            }
            (SignupStatus::Succeeded, _) => {
                waitlist.increment_if_known();
                tracing::info!(email = %attempt.normalized_email(), "Signup recorded");
            }
            _ => {}
        }
    }

    /// Fetch the exact number of stored contacts. Errors are swallowed.
    pub async fn load_count(&self) -> Option<u64> {
        let start = Instant::now();
        let result = self.store.count().await;
        metrics::record_store_call("count", start);
        match result {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::debug!(error = %e, "Waitlist count unavailable");
                None
            }
        }
    }
}

#[derive(Debug)]
struct FormState {
    email: String,
    attempt: Option<SignupAttempt>,
    active: bool,
}

/// One interactive newsletter form.
///
/// Cloning yields another handle onto the same form.
#[derive(Clone)]
pub struct SignupForm {
    submitter: SignupSubmitter,
    waitlist: Arc<WaitlistCount>,
    state: Arc<Mutex<FormState>>,
}

impl SignupForm {
    pub fn new(submitter: SignupSubmitter) -> Self {
        Self {
            submitter,
            waitlist: Arc::new(WaitlistCount::new()),
            state: Arc::new(Mutex::new(FormState {
                email: String::new(),
                attempt: None,
                active: true,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the email input.
    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().email = email.into();
    }

    pub fn email(&self) -> String {
        self.lock().email.clone()
    }

    /// Status of the latest attempt, `Idle` if none was started.
    pub fn status(&self) -> SignupStatus {
        self.lock()
            .attempt
            .as_ref()
            .map_or(SignupStatus::Idle, SignupAttempt::status)
    }

    pub fn message(&self) -> Option<String> {
        self.lock()
            .attempt
            .as_ref()
            .and_then(|a| a.message().map(String::from))
    }

    pub fn waitlist_count(&self) -> Option<u64> {
        self.waitlist.get()
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    /// Tear the form down. Attempts still in flight resolve as no-ops.
    pub fn close(&self) {
        self.lock().active = false;
    }

    /// Seed the displayed count once. Failures leave it absent.
    pub async fn load_count(&self) {
        if let Some(n) = self.submitter.load_count().await {
            if self.is_active() {
                self.waitlist.set(n);
            }
        }
    }

    /// Submit the current email.
    ///
    /// Returns `None` without touching the store when the email is blank, an
    /// attempt is already pending, or the form was closed before the store
    /// answered. Otherwise returns the terminal status of the new attempt.
    pub async fn submit(&self) -> Option<SignupStatus> {
        let normalized = {
            let mut state = self.lock();
            if !state.active {
                return None;
            }
            if state.attempt.as_ref().map(SignupAttempt::status) == Some(SignupStatus::Pending) {
                metrics::record_signup("in_flight");
                tracing::debug!("Submission ignored while another is pending");
                return None;
            }

            let mut attempt = SignupAttempt::new(&state.email);
            if !attempt.begin() {
                metrics::record_signup("skipped");
                return None;
            }
            let normalized = attempt.normalized_email().to_string();
            state.attempt = Some(attempt);
            normalized
        };

        let result = self.submitter.send(&normalized).await;

        let mut state = self.lock();
        if !state.active {
            tracing::debug!(email = %normalized, "Form closed before store answered");
            return None;
        }
        let attempt = state.attempt.as_mut()?;
        self.submitter.settle(attempt, &result, &self.waitlist);
        let status = attempt.status();

        if status == SignupStatus::Succeeded {
            state.email.clear();
        }
        Some(status)
    }
}
