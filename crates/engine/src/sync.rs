//! Session-owned cache of the ledger plus the manual refresh cooldown.
//!
//! Two independent clocks live here: the fetch time of the cached snapshot
//! (TTL) and the time of the last user-triggered refresh (cooldown). All
//! methods take `now` explicitly.

use std::{sync::Arc, time::Duration};

use api_types::sheet::SheetRow;
use chrono::{DateTime, TimeDelta, Utc};

use crate::{EngineError, ResultEngine, TripConfig};

/// Immutable copy of the ledger at `fetched_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    rows: Arc<[SheetRow]>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    #[must_use]
    pub fn new(rows: Vec<SheetRow>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            rows: rows.into(),
            fetched_at,
        }
    }

    /// Rows in ledger order.
    #[must_use]
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows worth listing, most recent first.
    ///
    /// Rows without a payer or an amount are left out.
    pub fn listing(&self) -> impl Iterator<Item = &SheetRow> {
        self.rows.iter().rev().filter(|row| {
            let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
            filled(&row.payer) && filled(&row.amount)
        })
    }
}

#[derive(Clone, Debug)]
pub struct SyncState {
    ttl: TimeDelta,
    cooldown: TimeDelta,
    snapshot: Option<Snapshot>,
    last_refresh: Option<DateTime<Utc>>,
    last_synced: Option<DateTime<Utc>>,
}

impl SyncState {
    #[must_use]
    pub fn new(ttl: Duration, cooldown: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            cooldown: TimeDelta::from_std(cooldown).unwrap_or(TimeDelta::MAX),
            snapshot: None,
            last_refresh: None,
            last_synced: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &TripConfig) -> Self {
        Self::new(config.cache_ttl(), config.refresh_cooldown())
    }

    /// The cached snapshot, if younger than the TTL.
    #[must_use]
    pub fn cached(&self, now: DateTime<Utc>) -> Option<&Snapshot> {
        self.snapshot
            .as_ref()
            .filter(|snap| now.signed_duration_since(snap.fetched_at) < self.ttl)
    }

    /// Replaces the cached snapshot; its fetch time also counts as a sync.
    pub fn store(&mut self, snapshot: Snapshot) {
        self.mark_synced(snapshot.fetched_at);
        self.snapshot = Some(snapshot);
    }

    /// Drops the cached snapshot so the next read goes to the store.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Records the last time the remote state was known to be current.
    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.last_synced = Some(at);
    }

    #[must_use]
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Whole seconds left before a manual refresh is allowed, `None` when
    /// allowed now.
    #[must_use]
    pub fn refresh_wait(&self, now: DateTime<Utc>) -> Option<u64> {
        let last = self.last_refresh?;
        let elapsed = now.signed_duration_since(last);
        if elapsed >= self.cooldown {
            return None;
        }
        let remaining_ms = self
            .cooldown
            .checked_sub(&elapsed)
            .unwrap_or(TimeDelta::MAX)
            .num_milliseconds()
            .max(0);
        Some((remaining_ms / 1000) as u64)
    }

    /// Accepts a manual refresh: starts a new cooldown window and drops the
    /// cached snapshot.
    pub fn begin_refresh(&mut self, now: DateTime<Utc>) -> ResultEngine<()> {
        if let Some(wait_secs) = self.refresh_wait(now) {
            return Err(EngineError::RefreshTooSoon { wait_secs });
        }
        self.last_refresh = Some(now);
        self.invalidate();
        Ok(())
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::from_config(&TripConfig::default())
    }
}
