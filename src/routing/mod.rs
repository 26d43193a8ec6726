//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query, geo hint, Accept-Language)
//!     → locale.rs (classify, root-path guard)
//!     → Return: PassThrough or RedirectTo(localized path)
//! ```
//!
//! # Design Decisions
//! - Router built once from config, immutable at runtime
//! - Deterministic: same input always yields the same decision
//! - Missing headers are normal input, never an error

pub mod locale;

pub use locale::{is_french_request, InboundRequest, LocaleRouter, RoutingDecision, ROOT_PATH};
