//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → middleware/locale.rs (root-path redirect decision)
//!     → newsletter.rs / pricing.rs handlers, or the static pages
//!     → Send to client
//! ```

pub mod middleware;
pub mod newsletter;
pub mod pricing;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, ServerError};
