use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow, bail};

use crate::player::{Player, PlayerFilters};
use crate::player_api::PlayerApi;
use crate::validation::validate_player;

pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Failure
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Absent,
    Loading,
    Fresh,
    Stale,
    Failed(String),
}

/// What the cache currently holds for one filter key, without triggering a fetch.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub status: QueryStatus,
    pub data: Option<Arc<Vec<Player>>>,
    pub fetched_at: Option<Instant>,
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn success_title(self) -> &'static str {
        match self {
            Mutation::Create => "Player created",
            Mutation::Update => "Player updated",
            Mutation::Delete => "Player deleted",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Mutation::Create => "The player has been successfully added.",
            Mutation::Update => "The player has been successfully updated.",
            Mutation::Delete => "The player has been successfully removed.",
        }
    }

    fn failure_title(self) -> &'static str {
        match self {
            Mutation::Create => "Error creating player",
            Mutation::Update => "Error updating player",
            Mutation::Delete => "Error deleting player",
        }
    }
}

#[derive(Debug, Clone)]
struct Cached {
    data: Arc<Vec<Player>>,
    fetched_at: Instant,
    epoch: u64,
}

#[derive(Debug, Clone, Copy)]
struct Inflight {
    load: u64,
    epoch: u64,
}

#[derive(Debug, Clone)]
struct Settled {
    load: u64,
    epoch: u64,
    error: Option<String>,
}

#[derive(Debug, Default)]
struct QueryEntry {
    data: Option<Cached>,
    inflight: Option<Inflight>,
    last: Option<Settled>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<PlayerFilters, QueryEntry>,
    // Bumped on every successful write; cached data is authoritative only for its own epoch.
    epoch: u64,
    next_load: u64,
}

/// Settles a load that never reached the normal completion path (a panicking backend or a
/// poisoned lock), so readers waiting on it wake up instead of blocking forever.
struct InflightGuard<'a> {
    store: &'a PlayerStore,
    key: &'a PlayerFilters,
    load: u64,
    epoch: u64,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self
            .store
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = inner.entries.get_mut(self.key)
            && entry.inflight.is_some_and(|i| i.load == self.load)
        {
            tracing::warn!(filters = %self.key.describe(), load = self.load, "player fetch aborted");
            entry.inflight = None;
            entry.last = Some(Settled {
                load: self.load,
                epoch: self.epoch,
                error: Some("player fetch aborted".to_string()),
            });
        }
        drop(inner);
        self.store.settled.notify_all();
    }
}

/// Read cache and write path for the player collection.
///
/// Reads are keyed by normalized [`PlayerFilters`]. At most one request per key is in flight;
/// concurrent readers of that key wait for it and share its outcome. Successful writes
/// invalidate every key at once.
pub struct PlayerStore {
    api: Arc<dyn PlayerApi>,
    stale_after: Duration,
    inner: Mutex<CacheInner>,
    settled: Condvar,
    notifier: Option<Sender<Notification>>,
}

impl PlayerStore {
    pub fn new(api: Arc<dyn PlayerApi>) -> Self {
        Self {
            api,
            stale_after: DEFAULT_STALE_AFTER,
            inner: Mutex::new(CacheInner::default()),
            settled: Condvar::new(),
            notifier: None,
        }
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn with_notifier(mut self, tx: Sender<Notification>) -> Self {
        self.notifier = Some(tx);
        self
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    pub fn players(&self, filters: &PlayerFilters) -> Result<Arc<Vec<Player>>> {
        let key = filters.normalized();
        let mut inner = self.lock()?;
        let read_epoch = inner.epoch;
        let mut joined: Option<u64> = None;

        loop {
            let current_epoch = inner.epoch;
            if let Some(entry) = inner.entries.get(&key) {
                if let Some(load) = joined
                    && let Some(settled) = entry.last.as_ref().filter(|s| s.load == load)
                {
                    if settled.epoch >= read_epoch {
                        if let Some(message) = &settled.error {
                            return Err(anyhow!(message.clone()));
                        }
                        if let Some(cached) = &entry.data {
                            return Ok(cached.data.clone());
                        }
                    }
                    joined = None;
                }

                if let Some(cached) = &entry.data
                    && cached.epoch == current_epoch
                    && cached.fetched_at.elapsed() < self.stale_after
                {
                    tracing::trace!(filters = %key.describe(), "player cache hit");
                    return Ok(cached.data.clone());
                }

                if let Some(inflight) = entry.inflight {
                    // Only adopt a request that started after every write this read must see.
                    if inflight.epoch >= read_epoch {
                        joined = Some(inflight.load);
                    }
                    inner = self
                        .settled
                        .wait(inner)
                        .map_err(|_| anyhow!("player cache lock poisoned"))?;
                    continue;
                }
            }
            break;
        }

        let load = inner.next_load;
        inner.next_load += 1;
        let epoch = inner.epoch;
        inner.entries.entry(key.clone()).or_default().inflight = Some(Inflight { load, epoch });
        drop(inner);

        let guard = InflightGuard {
            store: self,
            key: &key,
            load,
            epoch,
        };
        tracing::debug!(filters = %key.describe(), load, "fetching players");
        let result = self.api.list_players(&key);

        let mut inner = self.lock()?;
        let entry = inner.entries.entry(key.clone()).or_default();
        entry.inflight = None;
        let outcome = match result {
            Ok(players) => {
                let data = Arc::new(players);
                entry.data = Some(Cached {
                    data: data.clone(),
                    fetched_at: Instant::now(),
                    epoch,
                });
                entry.last = Some(Settled {
                    load,
                    epoch,
                    error: None,
                });
                Ok(data)
            }
            Err(err) => {
                let message = format!("{err:#}");
                tracing::warn!(filters = %key.describe(), error = %message, "player fetch failed");
                entry.last = Some(Settled {
                    load,
                    epoch,
                    error: Some(message.clone()),
                });
                Err(anyhow!(message))
            }
        };
        drop(inner);
        drop(guard);
        outcome
    }

    pub fn peek(&self, filters: &PlayerFilters) -> Result<QuerySnapshot> {
        let key = filters.normalized();
        let inner = self.lock()?;
        let Some(entry) = inner.entries.get(&key) else {
            return Ok(QuerySnapshot {
                status: QueryStatus::Absent,
                data: None,
                fetched_at: None,
            });
        };

        let status = if entry.inflight.is_some() {
            QueryStatus::Loading
        } else if let Some(message) = entry.last.as_ref().and_then(|s| s.error.clone()) {
            QueryStatus::Failed(message)
        } else {
            match &entry.data {
                Some(cached)
                    if cached.epoch == inner.epoch
                        && cached.fetched_at.elapsed() < self.stale_after =>
                {
                    QueryStatus::Fresh
                }
                Some(_) => QueryStatus::Stale,
                None => QueryStatus::Absent,
            }
        };

        Ok(QuerySnapshot {
            status,
            data: entry.data.as_ref().map(|c| c.data.clone()),
            fetched_at: entry.data.as_ref().map(|c| c.fetched_at),
        })
    }

    /// Marks every cached read as outdated; the next read of any key refetches.
    ///
    /// Entries that were already stale and have no request in flight are dropped, so keys
    /// from abandoned filters do not accumulate.
    pub fn invalidate_players(&self) -> Result<()> {
        let mut inner = self.lock()?;
        let epoch = inner.epoch;
        let stale_after = self.stale_after;
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| {
            entry.inflight.is_some()
                || entry
                    .data
                    .as_ref()
                    .is_some_and(|c| c.epoch == epoch && c.fetched_at.elapsed() < stale_after)
        });
        let pruned = before - inner.entries.len();
        inner.epoch += 1;
        tracing::debug!(epoch = inner.epoch, pruned, "player cache invalidated");
        Ok(())
    }

    pub fn create_player(&self, draft: &Player) -> Result<Player> {
        self.mutate(Mutation::Create, || {
            let draft = Player {
                id: None,
                ..draft.clone()
            };
            validate_player(&draft)?;
            self.api.create_player(&draft)
        })
    }

    pub fn update_player(&self, player: &Player) -> Result<Player> {
        self.mutate(Mutation::Update, || {
            if player.id.is_none() {
                bail!("cannot update {:?}: record has no id", player.player);
            }
            validate_player(player)?;
            self.api.update_player(player)
        })
    }

    pub fn delete_player(&self, name: &str) -> Result<()> {
        self.mutate(Mutation::Delete, || {
            if name.trim().is_empty() {
                bail!("player name is required");
            }
            self.api.delete_player(name)
        })
    }

    fn mutate<T>(&self, mutation: Mutation, op: impl FnOnce() -> Result<T>) -> Result<T> {
        match op() {
            Ok(value) => {
                self.invalidate_players()?;
                tracing::info!(title = mutation.success_title(), "player mutation succeeded");
                self.notify(Notification {
                    kind: NotificationKind::Success,
                    title: mutation.success_title().to_string(),
                    message: mutation.success_message().to_string(),
                });
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(title = mutation.failure_title(), error = %format!("{err:#}"), "player mutation failed");
                self.notify(Notification {
                    kind: NotificationKind::Failure,
                    title: mutation.failure_title().to_string(),
                    message: format!("{err:#}"),
                });
                Err(err)
            }
        }
    }

    fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.notifier {
            let _ = tx.send(notification);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheInner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("player cache lock poisoned"))
    }
}
