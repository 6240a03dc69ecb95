//! Per-session serialization of transcript writes.
//!
//! Two concurrent turns on the same session (a double-submit from a flaky
//! client) must not interleave their customer-write / context-read /
//! assistant-write sequences. Handlers take the session's lock for the
//! whole turn; different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

/// Registry of per-session async locks.
///
/// Entries are held weakly: once every guard for a session is dropped,
/// the lock can be collected on a later sweep, so the map does not grow
/// with the total number of sessions ever seen.
#[derive(Default)]
pub struct SessionGuard {
    locks: Mutex<HashMap<SessionId, Weak<AsyncMutex<()>>>>,
}

/// Sweep threshold: compact the registry when it grows past this.
const SWEEP_THRESHOLD: usize = 1024;

impl SessionGuard {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a session, waiting if another request holds it.
    pub async fn acquire(&self, session_id: SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("session guard mutex poisoned");

            if locks.len() > SWEEP_THRESHOLD {
                locks.retain(|_, weak| weak.strong_count() > 0);
            }

            match locks.get(&session_id).and_then(Weak::upgrade) {
                Some(existing) => existing,
                None => {
                    let fresh = Arc::new(AsyncMutex::new(()));
                    locks.insert(session_id, Arc::downgrade(&fresh));
                    fresh
                }
            }
        };

        lock.lock_owned().await
    }
}
