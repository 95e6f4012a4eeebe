//! Storage abstractions for the service layer
//!
//! The store talks to persistence only through [`QuoteRepository`], so tests
//! can swap the JSON file for an in-memory or failing implementation.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::quotes::Quote;

pub mod json_file;

pub use json_file::JsonFileRepository;

/// Trait abstraction for the backing collection.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Read the whole collection, in stored order.
    async fn load(&self) -> Result<Vec<Quote>, ServiceError>;
    /// Replace the stored collection with `quotes`.
    async fn save(&self, quotes: &[Quote]) -> Result<(), ServiceError>;
}
