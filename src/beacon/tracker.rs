//! Beacon flags shared across request handlers.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A reporting event fired by the auction worklets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconKind {
    /// `reportResult` from the seller's decision logic.
    Seller,
    /// `reportWin` from the winning buyer's bidding logic.
    Bidding,
}

/// Consistent view of both flags taken under a single lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeaconSnapshot {
    pub seller_reported: bool,
    pub bidding_reported: bool,
    pub both: bool,
}

#[derive(Debug, Default)]
struct BeaconState {
    seller_reported: bool,
    bidding_reported: bool,
}

/// Records which beacons have been observed since the last reset.
#[derive(Debug, Default)]
pub struct BeaconTracker {
    state: Mutex<BeaconState>,
}

impl BeaconTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a beacon as seen. Recording the same kind twice is a no-op.
    pub fn record(&self, kind: BeaconKind) {
        let mut state = self.lock();
        match kind {
            BeaconKind::Seller => state.seller_reported = true,
            BeaconKind::Bidding => state.bidding_reported = true,
        }
        tracing::debug!(?kind, "Beacon recorded");
    }

    /// Clear both flags.
    pub fn reset(&self) {
        *self.lock() = BeaconState::default();
        tracing::debug!("Beacon state reset");
    }

    pub fn snapshot(&self) -> BeaconSnapshot {
        let state = self.lock();
        BeaconSnapshot {
            seller_reported: state.seller_reported,
            bidding_reported: state.bidding_reported,
            both: state.seller_reported && state.bidding_reported,
        }
    }

    // Two bools cannot be left half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, BeaconState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
