//! Quote collection: domain types and the shared in-memory store.

pub mod domain;
pub mod store;

pub use domain::{NewQuote, NextQuote, Quote};
pub use store::QuoteStore;
