use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use super::domain::{next_id, NextQuote, Quote};
use crate::errors::ServiceError;
use crate::observability::{QUOTES_CREATED_TOTAL, QUOTES_TOTAL, SAVE_FAILURES_TOTAL};
use crate::storage::QuoteRepository;

/// In-memory quote collection shared by all request handlers.
///
/// Readers share one `RwLock`; `append` and `replace_all` take it exclusively
/// and only for the in-memory mutation. Persistence runs after the lock is
/// released, serialised by `save_lock`, and always writes the latest snapshot.
pub struct QuoteStore {
    quotes: RwLock<Vec<Quote>>,
    repo: Arc<dyn QuoteRepository>,
    save_lock: Mutex<()>,
}

impl QuoteStore {
    /// Empty store over `repo`; nothing is read until [`QuoteStore::reload`].
    pub fn new(repo: Arc<dyn QuoteRepository>) -> Self {
        Self { quotes: RwLock::new(Vec::new()), repo, save_lock: Mutex::new(()) }
    }

    /// Build the store and perform the initial load. Any load error is returned
    /// unchanged so startup can abort on an unreadable data file.
    pub async fn open(repo: Arc<dyn QuoteRepository>) -> Result<Arc<Self>, ServiceError> {
        let store = Self::new(repo);
        store.reload().await?;
        Ok(Arc::new(store))
    }

    /// Snapshot of all quotes in insertion order.
    pub async fn list(&self) -> Vec<Quote> {
        self.quotes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }

    /// One quote chosen uniformly at random.
    pub async fn random(&self) -> Result<Quote, ServiceError> {
        let quotes = self.quotes.read().await;
        quotes
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(ServiceError::EmptyCollection)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Quote, ServiceError> {
        let quotes = self.quotes.read().await;
        quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("quote"))
    }

    /// Quote at `start` (modulo the current length, default 0) plus the index
    /// that should be passed in on the following call.
    pub async fn next_in_cycle(&self, start: Option<usize>) -> Result<NextQuote, ServiceError> {
        let quotes = self.quotes.read().await;
        if quotes.is_empty() {
            return Err(ServiceError::EmptyCollection);
        }
        let len = quotes.len();
        let pos = start.unwrap_or(0) % len;
        let current = &quotes[pos];
        Ok(NextQuote {
            next_index: (pos + 1) % len,
            id: current.id.clone(),
            quote: current.quote.clone(),
        })
    }

    /// Append a quote and persist the collection.
    ///
    /// The quote stays in memory even when the save fails; the failure is
    /// logged and counted, never surfaced to the caller.
    pub async fn append(&self, text: String) -> Quote {
        let created = {
            let mut quotes = self.quotes.write().await;
            let quote = Quote { id: next_id(&quotes), quote: text };
            quotes.push(quote.clone());
            QUOTES_TOTAL.set(quotes.len() as i64);
            quote
        };
        QUOTES_CREATED_TOTAL.inc();
        info!(event = "quote_created", id = %created.id, "quote appended");

        if let Err(e) = self.persist().await {
            SAVE_FAILURES_TOTAL.inc();
            error!(event = "save_failed", id = %created.id, error = %e, "quote kept in memory but not persisted");
        }
        created
    }

    /// Discard the current collection and install `quotes`.
    pub async fn replace_all(&self, quotes: Vec<Quote>) {
        let mut current = self.quotes.write().await;
        *current = quotes;
        QUOTES_TOTAL.set(current.len() as i64);
    }

    /// Load from the repository and, on success, replace the collection.
    /// On failure the in-memory state is left untouched.
    pub async fn reload(&self) -> Result<usize, ServiceError> {
        let loaded = self.repo.load().await?;
        let count = loaded.len();
        self.replace_all(loaded).await;
        Ok(count)
    }

    /// Write the current collection through the repository.
    pub async fn persist(&self) -> Result<(), ServiceError> {
        let _guard = self.save_lock.lock().await;
        let snapshot = self.list().await;
        self.repo.save(&snapshot).await
    }
}
