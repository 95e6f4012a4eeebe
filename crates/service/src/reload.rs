//! Periodic reload of the quote collection from its backing file.
//!
//! External edits to the data file become visible without a restart. A failed
//! reload is logged and the previous collection stays in place; the timer keeps
//! running for the lifetime of the process.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::observability::{RELOADS_TOTAL, RELOAD_FAILURES_TOTAL};
use crate::quotes::QuoteStore;

pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(60);

/// Why a reload ran; only used for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Scheduled,
    Manual,
}

impl ReloadTrigger {
    fn as_str(self) -> &'static str {
        match self {
            ReloadTrigger::Scheduled => "scheduled",
            ReloadTrigger::Manual => "manual",
        }
    }
}

pub struct ReloadScheduler {
    store: Arc<QuoteStore>,
    interval: Duration,
}

impl ReloadScheduler {
    /// A zero interval is replaced by [`DEFAULT_RELOAD_INTERVAL`].
    pub fn new(store: Arc<QuoteStore>, interval: Duration) -> Self {
        let interval = if interval.is_zero() { DEFAULT_RELOAD_INTERVAL } else { interval };
        Self { store, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run on the current tokio runtime; the handle is only needed for shutdown.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.start())
    }

    /// Tick forever. The first tick is skipped because startup already loaded.
    pub async fn start(self) {
        info!(
            event = "reload_scheduler_start",
            interval_secs = self.interval.as_secs(),
            "starting periodic quote reload"
        );

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let _ = reload_now(&self.store, ReloadTrigger::Scheduled).await;
        }
    }
}

/// Load-then-replace shared by the timer and the manual endpoint.
/// Returns the number of quotes now in memory.
pub async fn reload_now(
    store: &QuoteStore,
    trigger: ReloadTrigger,
) -> Result<usize, crate::errors::ServiceError> {
    match store.reload().await {
        Ok(count) => {
            RELOADS_TOTAL.inc();
            info!(event = "reload", trigger = trigger.as_str(), count, "reloaded quotes");
            Ok(count)
        }
        Err(e) => {
            RELOAD_FAILURES_TOTAL.inc();
            error!(event = "reload_failed", trigger = trigger.as_str(), error = %e, "error reloading quotes; keeping previous set");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::Quote;
    use crate::storage::{JsonFileRepository, QuoteRepository};

    async fn file_store() -> Result<(Arc<QuoteStore>, JsonFileRepository), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("quote_reload_{}.json", uuid::Uuid::new_v4()));
        let repo = JsonFileRepository::new(&path);
        repo.save(&[Quote::new("1", "a")]).await?;
        let store = QuoteStore::open(Arc::new(repo.clone())).await?;
        Ok((store, repo))
    }

    #[test]
    fn zero_interval_uses_default() {
        let store = Arc::new(QuoteStore::new(Arc::new(JsonFileRepository::new("unused.json"))));
        let s = ReloadScheduler::new(Arc::clone(&store), Duration::ZERO);
        assert_eq!(s.interval(), DEFAULT_RELOAD_INTERVAL);
        let s = ReloadScheduler::new(store, Duration::from_secs(5));
        assert_eq!(s.interval(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn manual_reload_picks_up_external_edit() -> Result<(), anyhow::Error> {
        let (store, repo) = file_store().await?;
        tokio::fs::write(repo.path(), r#"[{"id":"1","quote":"a"},{"id":"2","quote":"b"}]"#).await?;
        assert_eq!(reload_now(&store, ReloadTrigger::Manual).await?, 2);
        assert_eq!(store.get_by_id("2").await?.quote, "b");
        let _ = tokio::fs::remove_file(repo.path()).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_keeps_previous_state() -> Result<(), anyhow::Error> {
        let (store, repo) = file_store().await?;
        tokio::fs::write(repo.path(), "{ not an array").await?;
        assert!(reload_now(&store, ReloadTrigger::Manual).await.is_err());
        assert_eq!(store.list().await, vec![Quote::new("1", "a")]);
        let _ = tokio::fs::remove_file(repo.path()).await;
        Ok(())
    }

    #[tokio::test]
    async fn scheduler_reloads_on_each_tick() -> Result<(), anyhow::Error> {
        let (store, repo) = file_store().await?;
        let handle = ReloadScheduler::new(Arc::clone(&store), Duration::from_millis(50)).spawn();

        tokio::fs::write(repo.path(), r#"[{"id":"1","quote":"a"},{"id":"2","quote":"b"}]"#).await?;
        for _ in 0..100 {
            if store.len().await == 2 { break; }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(store.len().await, 2);

        // a broken file does not stop the timer
        tokio::fs::write(repo.path(), "garbage").await?;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.len().await, 2);
        tokio::fs::write(repo.path(), "[]").await?;
        for _ in 0..100 {
            if store.is_empty().await { break; }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(store.is_empty().await);

        handle.abort();
        let _ = tokio::fs::remove_file(repo.path()).await;
        Ok(())
    }
}
