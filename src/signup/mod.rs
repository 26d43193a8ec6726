//! Newsletter signup subsystem.
//!
//! # Data Flow
//! ```text
//! raw email (form / HTTP body)
//!     → types.rs (normalize, Idle → Pending)
//!     → submitter.rs (one insert via ContactStore)
//!     → store.rs / postgrest.rs (remote table `beta_waitlist`)
//!     → types.rs (classify: Succeeded | DuplicateRejected | Failed)
//!     → user-facing status + message
//! ```
//!
//! # Design Decisions
//! - Duplicates are a confirmation for the user, a distinct status internally
//! - The store is the only source of truth for registered emails
//! - The displayed count is a snapshot, bumped optimistically

pub mod count;
pub mod memory;
pub mod postgrest;
pub mod store;
pub mod submitter;
pub mod types;

pub use count::WaitlistCount;
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use store::{ContactStore, NewContact, StoreError, UNIQUE_VIOLATION};
pub use submitter::{SignupForm, SignupSubmitter};
pub use types::{classify, normalize_email, SignupAttempt, SignupStatus};
