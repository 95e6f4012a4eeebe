use std::net::IpAddr;
use std::sync::Arc;

use service::QuoteStore;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<QuoteStore>,
    pub read_only: bool,
    pub trusted_proxies: Arc<Vec<IpAddr>>,
}

impl AppState {
    pub fn new(store: Arc<QuoteStore>, read_only: bool, trusted_proxies: Vec<IpAddr>) -> Self {
        Self { store, read_only, trusted_proxies: Arc::new(trusted_proxies) }
    }
}
