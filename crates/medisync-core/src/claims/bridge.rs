//! Simulated insurer bridge.
//!
//! Real adjudication is asynchronous, so a freshly submitted claim must not
//! resolve in the same call. Each submission gets a one-shot timer that
//! advances the claim Submitted → Processing after a fixed delay. The timer
//! is keyed by claim id and cancellable; a fired timer re-checks the store
//! before applying, so a removed or already-advanced claim is never touched.

use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::db::Database;
use crate::models::ClaimStatus;

/// Bridge tuning.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Delay before a submitted claim moves to Processing.
    pub processing_delay: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_secs(3),
        }
    }
}

/// Electronic claim bridge with cancellable per-claim timers.
#[derive(Clone)]
pub struct ClaimBridge {
    db: Arc<Mutex<Database>>,
    config: BridgeConfig,
    pending: Arc<Mutex<HashMap<String, Sender<()>>>>,
}

impl ClaimBridge {
    /// Create a bridge over the shared store.
    pub fn new(db: Arc<Mutex<Database>>, config: BridgeConfig) -> Self {
        Self {
            db,
            config,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedule the Submitted → Processing transition for a claim.
    ///
    /// Returns immediately; the transition is applied from a background
    /// thread after the configured delay. Scheduling again for the same id
    /// replaces (and thereby cancels) the previous timer.
    pub fn schedule_processing(&self, claim_id: &str) {
        let (tx, rx) = mpsc::channel::<()>();

        // Replacing an existing sender drops it, waking its timer thread
        // with a disconnect before the timeout.
        if let Ok(mut pending) = self.pending.lock() {
            pending.insert(claim_id.to_string(), tx);
        }

        let db = Arc::clone(&self.db);
        let pending = Arc::clone(&self.pending);
        let delay = self.config.processing_delay;
        let claim_id = claim_id.to_string();
        let timer_claim_id = claim_id.clone();

        thread::spawn(move || match rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                if let Ok(mut map) = pending.lock() {
                    map.remove(&timer_claim_id);
                }
                apply_processing(&db, &timer_claim_id);
            }
            _ => {
                tracing::debug!(claim_id = %timer_claim_id, "claim bridge timer cancelled");
            }
        });

        tracing::debug!(
            claim_id = %claim_id,
            delay_ms = delay.as_millis() as u64,
            "claim bridge transition scheduled"
        );
    }

    /// Cancel the pending timer for a claim, if any.
    ///
    /// Called when the claim is removed before the insurer responds.
    pub fn cancel(&self, claim_id: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            // Dropping the sender wakes the timer thread immediately.
            pending.remove(claim_id);
        }
    }

    /// Number of timers currently pending.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }
}

/// Apply the delayed transition, guarded against stale state: the claim
/// must still exist and still be Submitted.
fn apply_processing(db: &Arc<Mutex<Database>>, claim_id: &str) {
    let Ok(db) = db.lock() else {
        return;
    };

    match db.get_claim(claim_id) {
        Ok(Some(claim)) if claim.status == ClaimStatus::Submitted => {
            if let Err(e) = db.update_claim_status(claim_id, ClaimStatus::Processing) {
                tracing::warn!(claim_id = %claim_id, error = %e, "claim bridge transition failed");
            } else {
                tracing::debug!(claim_id = %claim_id, "claim moved to Processing");
            }
        }
        Ok(Some(claim)) => {
            tracing::debug!(
                claim_id = %claim_id,
                status = claim.status.as_str(),
                "claim already past Submitted, bridge transition skipped"
            );
        }
        Ok(None) => {
            tracing::debug!(claim_id = %claim_id, "claim removed before bridge fired");
        }
        Err(e) => {
            tracing::warn!(claim_id = %claim_id, error = %e, "claim bridge lookup failed");
        }
    }
}
