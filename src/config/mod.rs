//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, resolve secrets from env)
//!     → validation.rs (semantic checks)
//!     → LandingConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::LandingConfig;
pub use schema::ListenerConfig;
pub use schema::LocaleConfig;
pub use schema::NewsletterConfig;
pub use schema::PlanConfig;
pub use schema::PricingConfig;
pub use schema::StoreConfig;
