//! Landing site service for vvault: locale redirect, newsletter signup and pricing.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pricing;
pub mod routing;
pub mod signup;

pub use config::schema::LandingConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
