//! In-process contact store.
//!
//! Enforces the same unique-email rule as the remote table and reports
//! violations with the same code, so the submitter can run without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::signup::store::{ContactStore, NewContact, StoreError, UNIQUE_VIOLATION};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: DashMap<String, NewContact>,
    order: Mutex<Vec<String>>,
    insert_calls: AtomicUsize,
    insert_failure: Mutex<Option<StoreError>>,
    count_fails: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `emails`.
    pub fn with_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for email in emails {
            store.push(NewContact {
                email: email.into(),
                source: "seed".to_string(),
            });
        }
        store
    }

    /// Make `count` always fail.
    pub fn failing_count(mut self) -> Self {
        self.count_fails = true;
        self
    }

    /// Make every insert fail with `error`, or restore normal behavior with `None`.
    pub fn fail_inserts(&self, error: Option<StoreError>) {
        *self.insert_failure.lock().unwrap_or_else(|p| p.into_inner()) = error;
    }

    /// Number of insert calls received, including rejected ones.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Stored rows in insertion order.
    pub fn rows(&self) -> Vec<NewContact> {
        let order = self.order.lock().unwrap_or_else(|p| p.into_inner());
        order
            .iter()
            .filter_map(|email| self.rows.get(email).map(|r| r.value().clone()))
            .collect()
    }

    fn push(&self, contact: NewContact) -> bool {
        let mut order = self.order.lock().unwrap_or_else(|p| p.into_inner());
        if self.rows.contains_key(&contact.email) {
            return false;
        }
        order.push(contact.email.clone());
        self.rows.insert(contact.email.clone(), contact);
        true
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert(&self, contact: &NewContact) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(e) = self.insert_failure.lock().unwrap_or_else(|p| p.into_inner()).clone() {
            return Err(e);
        }

        if self.push(contact.clone()) {
            Ok(())
        } else {
            Err(StoreError::Rejected {
                status: 409,
                code: Some(UNIQUE_VIOLATION.to_string()),
                message: "duplicate key value violates unique constraint \"beta_waitlist_email_key\""
                    .to_string(),
            })
        }
    }

    async fn count(&self) -> Result<u64, StoreError> {
        if self.count_fails {
            return Err(StoreError::Transport("count unavailable".to_string()));
        }
        Ok(self.rows.len() as u64)
    }
}
