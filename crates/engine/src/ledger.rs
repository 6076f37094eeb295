use api_types::sheet::SheetRow;
use chrono::{DateTime, Utc};

use crate::{
    EngineError, EntryDraft, ExpenseEntry, ResultEngine, Settlement, Snapshot, SyncState,
    TripConfig, settlement::settle, store::Freshness, store::LedgerStore, validate::validate,
};

/// The shared ledger as seen by one session.
///
/// Owns the store handle, the trip constants and the session [`SyncState`]
/// (cached snapshot, refresh cooldown).
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    config: TripConfig,
    sync: SyncState,
}

impl<S: LedgerStore> Ledger<S> {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder<S> {
        LedgerBuilder::default()
    }

    #[must_use]
    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    #[must_use]
    pub fn sync(&self) -> &SyncState {
        &self.sync
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the whole ledger.
    ///
    /// With [`Freshness::Cached`] a snapshot younger than the TTL is reused.
    /// Any remote read replaces the cached snapshot.
    pub async fn read_all(
        &mut self,
        freshness: Freshness,
        now: DateTime<Utc>,
    ) -> ResultEngine<Snapshot> {
        if freshness == Freshness::Cached
            && let Some(snapshot) = self.sync.cached(now)
        {
            tracing::debug!("ledger cache hit ({} rows)", snapshot.len());
            return Ok(snapshot.clone());
        }

        let rows = self.store.read_rows().await.inspect_err(|err| {
            tracing::warn!("failed to read ledger from {}: {err}", self.store.location());
        })?;
        tracing::debug!(
            "fetched {} rows from {} ({freshness:?})",
            rows.len(),
            self.store.location()
        );
        let snapshot = Snapshot::new(rows, now);
        self.sync.store(snapshot.clone());
        Ok(snapshot)
    }

    /// Appends `entry` to the remote ledger.
    ///
    /// The sheet is re-read right before writing so rows added by another
    /// session since our last read are kept. This narrows the lost-update
    /// window without closing it: two commits interleaving between read and
    /// overwrite still lose one of the two rows.
    ///
    /// On success the cache is dropped and the new row count is returned. On
    /// failure the cache is left as it was.
    pub async fn append_and_commit(
        &mut self,
        entry: &ExpenseEntry,
        now: DateTime<Utc>,
    ) -> ResultEngine<usize> {
        let mut rows: Vec<SheetRow> = self.store.read_rows().await.inspect_err(|err| {
            tracing::warn!("fresh read before append failed: {err}");
        })?;
        rows.push(SheetRow::from(entry));

        self.store.overwrite_rows(&rows).await.inspect_err(|err| {
            tracing::error!(
                "failed to write ledger to {}: {err}",
                self.store.location()
            );
        })?;

        self.sync.invalidate();
        self.sync.mark_synced(now);
        tracing::info!(
            "recorded \"{}\" ({} {}) paid by {}, ledger has {} rows",
            entry.item,
            entry.amount,
            entry.currency,
            entry.payer,
            rows.len()
        );
        Ok(rows.len())
    }

    /// Validates `draft` and appends it. Nothing is written when the draft is
    /// rejected.
    pub async fn add(
        &mut self,
        draft: &EntryDraft,
        now: DateTime<Utc>,
    ) -> ResultEngine<ExpenseEntry> {
        let entry = validate(draft, &self.config.participants)?;
        self.append_and_commit(&entry, now).await?;
        Ok(entry)
    }

    /// Manual refresh: rate limited by the cooldown, then a remote read.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> ResultEngine<Snapshot> {
        self.sync.begin_refresh(now)?;
        tracing::info!("manual refresh of {}", self.store.location());
        self.read_all(Freshness::Cached, now).await
    }

    /// Settlement of the current (possibly cached) ledger.
    pub async fn summary(&mut self, now: DateTime<Utc>) -> ResultEngine<Settlement> {
        let snapshot = self.read_all(Freshness::Cached, now).await?;
        Ok(self.settle(&snapshot))
    }

    /// Settles a snapshot with this ledger's trip constants.
    #[must_use]
    pub fn settle(&self, snapshot: &Snapshot) -> Settlement {
        settle(
            snapshot.rows(),
            self.config.exchange_rate,
            &self.config.participants,
            self.config.balanced_below,
        )
    }
}

/// The builder for `Ledger`
#[derive(Debug)]
pub struct LedgerBuilder<S> {
    store: Option<S>,
    config: TripConfig,
    sync: Option<SyncState>,
}

impl<S> Default for LedgerBuilder<S> {
    fn default() -> Self {
        Self {
            store: None,
            config: TripConfig::default(),
            sync: None,
        }
    }
}

impl<S: LedgerStore> LedgerBuilder<S> {
    /// Pass the required store
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: TripConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing session state instead of a fresh one.
    pub fn sync_state(mut self, sync: SyncState) -> Self {
        self.sync = Some(sync);
        self
    }

    /// Construct `Ledger`
    pub fn build(self) -> ResultEngine<Ledger<S>> {
        self.config.validate()?;
        let store = self
            .store
            .ok_or_else(|| EngineError::InvalidConfig("missing ledger store".to_string()))?;
        let sync = self
            .sync
            .unwrap_or_else(|| SyncState::from_config(&self.config));
        tracing::debug!("ledger ready on {}", store.location());
        Ok(Ledger {
            store,
            config: self.config,
            sync,
        })
    }
}
