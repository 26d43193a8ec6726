//! Pricing section backing the three-way billing toggle.
//!
//! Prices are static configuration held in cents; payment is handled
//! entirely by the product application behind the CTA links.

pub mod engine;
pub mod links;
pub mod types;

pub use engine::{format_euro, PricingEngine};
pub use links::LinkBuilder;
pub use types::{Billing, PlanOffer, PricingTable};
