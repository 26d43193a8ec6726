//! Request-interception middleware.

pub mod locale;

pub use locale::locale_redirect_middleware;
