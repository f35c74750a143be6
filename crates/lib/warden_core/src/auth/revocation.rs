//! Access token revocation (logout).
//!
//! Tokens are keyed by their SHA-256 digest and kept only until their natural
//! expiry; after that the signature check rejects them anyway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Interval between expiry sweeps of the in-memory store.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Set of tokens invalidated before their natural expiry.
///
/// Implementations must be safe under concurrent `revoke`/`is_revoked`.
/// A shared implementation must give every instance read-your-writes on
/// `revoke` for the remaining lifetime of the token.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Revoke `token` until `expires_at`. Revoking twice is a no-op.
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>);

    /// Whether `token` has been revoked.
    async fn is_revoked(&self, token: &str) -> bool;

    /// Drop entries whose token has expired anyway. Returns how many went.
    async fn purge_expired(&self) -> usize;
}

/// SHA-256 hex digest used as the revocation key.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Process-local revocation store.
///
/// Not shared between instances; see [`RevocationStore`] for the contract a
/// shared replacement has to honour.
pub struct MemoryRevocationStore {
    revoked: DashMap<String, DateTime<Utc>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self {
            revoked: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }

    /// Spawn a periodic expiry sweep.
    pub fn spawn_cleanup_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "purged expired revocations");
                }
            }
        })
    }
}

impl Default for MemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) {
        self.revoked
            .entry(token_fingerprint(token))
            .and_modify(|existing| *existing = (*existing).max(expires_at))
            .or_insert(expires_at);
    }

    async fn is_revoked(&self, token: &str) -> bool {
        self.revoked.contains_key(&token_fingerprint(token))
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.revoked.len();
        self.revoked.retain(|_, expires_at| *expires_at > now);
        before.saturating_sub(self.revoked.len())
    }
}
