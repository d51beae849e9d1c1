//! Logout revocation.
//!
//! A revoked token only needs remembering until it would have expired on
//! its own, so entries carry the token's expiry and are purged after it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use sha2::{Digest, Sha256};
use tracing::debug;

pub trait RevocationStore: Send + Sync {
    /// Reject `token` until `expires_at`.
    fn revoke(&self, token: &str, expires_at: Timestamp);

    fn is_revoked(&self, token: &str) -> bool;
}

/// Process-local store keyed by the SHA-256 of the token.
#[derive(Default)]
pub struct InMemoryRevocations {
    entries: Mutex<HashMap<String, Timestamp>>,
}

impl InMemoryRevocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries. Expired ones are dropped first.
    pub fn len(&self) -> usize {
        let mut entries = self.lock();
        purge(&mut entries, Timestamp::now());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Timestamp>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RevocationStore for InMemoryRevocations {
    fn revoke(&self, token: &str, expires_at: Timestamp) {
        let now = Timestamp::now();
        let mut entries = self.lock();
        purge(&mut entries, now);
        if expires_at > now {
            entries.insert(fingerprint(token), expires_at);
        }
    }

    fn is_revoked(&self, token: &str) -> bool {
        let entries = self.lock();
        entries
            .get(&fingerprint(token))
            .is_some_and(|expires_at| *expires_at > Timestamp::now())
    }
}

fn purge(entries: &mut HashMap<String, Timestamp>, now: Timestamp) {
    let before = entries.len();
    entries.retain(|_, expires_at| *expires_at > now);
    let dropped = before - entries.len();
    if dropped > 0 {
        debug!(dropped, "purged expired revocations");
    }
}

fn fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
