//! Service layer for the quote collection.
//! - `quotes`: domain types and the concurrent in-memory store.
//! - `storage`: persistence behind the `QuoteRepository` trait.
//! - `reload`: periodic and on-demand reload from the data file.
//! - `observability`: Prometheus metrics fed by the store.

pub mod errors;
pub mod observability;
pub mod quotes;
pub mod reload;
pub mod storage;

pub use errors::ServiceError;
pub use quotes::{NewQuote, NextQuote, Quote, QuoteStore};
