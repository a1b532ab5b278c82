//! The `LinkStore` — lifecycle manager for dynamic links.
//!
//! # Concurrency
//!
//! The store holds its state as `RwLock<Arc<LinkSet>>`.  Every mutation
//! (assert, retract, reconcile) builds a complete replacement [`LinkSet`]
//! *outside* the state lock, then swaps the `Arc` in; readers take the read
//! lock only long enough to clone the `Arc`.  A route query therefore runs
//! entirely lock-free against one immutable snapshot, and a reconciliation
//! is observed atomically — no reader can see a half-merged link set.
//!
//! Mutations are serialized by a separate `write_lock`, held from the
//! snapshot clone through the swap and the file write.  Two concurrent
//! mutations therefore compose rather than one clobbering the other's work,
//! and snapshot files hit the disk in swap order.  A failed write is logged
//! and the in-memory state remains authoritative; the durable copy catches
//! up on the next successful write.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use hl_core::{PairKey, SystemId};
use hl_map::Starmap;

use crate::error::LinkError;
use crate::link::{DynamicLink, LinkMetadata, LinkSource};
use crate::snapshot::{load_snapshot, save_snapshot};

// ── LinkSet ───────────────────────────────────────────────────────────────────

/// An immutable snapshot of the current dynamic links and the adjacency they
/// induce.  Adjacency is derived from the link map in the constructor, so an
/// edge exists in the overlay iff a link record exists for the pair.
pub struct LinkSet {
    links: FxHashMap<PairKey, DynamicLink>,
    adjacency: FxHashMap<SystemId, Vec<SystemId>>,
}

impl LinkSet {
    fn build(links: FxHashMap<PairKey, DynamicLink>) -> Self {
        let mut adjacency: FxHashMap<SystemId, Vec<SystemId>> = FxHashMap::default();
        for pair in links.keys() {
            adjacency.entry(pair.low()).or_default().push(pair.high());
            adjacency.entry(pair.high()).or_default().push(pair.low());
        }
        Self { links, adjacency }
    }

    pub fn empty() -> Self {
        Self::build(FxHashMap::default())
    }

    /// Systems connected to `sys` by a dynamic link.
    pub fn neighbors(&self, sys: SystemId) -> &[SystemId] {
        self.adjacency.get(&sys).map_or(&[], Vec::as_slice)
    }

    /// Number of dynamic links touching `sys`.
    pub fn degree(&self, sys: SystemId) -> usize {
        self.neighbors(sys).len()
    }

    /// The link between `a` and `b`, if one is currently held.
    pub fn link_between(&self, a: SystemId, b: SystemId) -> Option<&DynamicLink> {
        if a == b {
            return None;
        }
        self.links.get(&PairKey::new(a, b))
    }

    /// Iterator over all current links with their pair keys.
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, &DynamicLink)> {
        self.links.iter().map(|(&k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

// ── ReconcileSummary ──────────────────────────────────────────────────────────

/// Counts reported by one reconciliation round, for logging and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Feed links inserted or replaced this round.
    pub feed_upserted: usize,
    /// Feed links removed because they vanished from the poll.
    pub feed_stale: usize,
    /// Feed records skipped because their nominal expiry had passed.
    pub feed_expired: usize,
    /// Feed records skipped because an endpoint name did not resolve.
    pub feed_unknown: usize,
    /// Local links dropped by the 48 h rule this round.
    pub local_expired: usize,
    /// Links held after the round.
    pub total: usize,
}

// ── LinkStore ─────────────────────────────────────────────────────────────────

/// Owns the mutable dynamic-link set; shared between the route engine (reads)
/// and the feed refresher plus link-management callers (writes).
pub struct LinkStore {
    map: Arc<Starmap>,
    path: PathBuf,
    inner: RwLock<Arc<LinkSet>>,
    /// Serializes whole mutations, clone through swap and file write.
    /// Acquired before `inner`'s write lock, never the other way round.
    write_lock: Mutex<()>,
}

impl LinkStore {
    /// Open a store backed by the snapshot file at `path`.
    ///
    /// If the file exists its records are loaded, dropping local links past
    /// the 48 h rule, feed links past nominal expiry, and records whose
    /// endpoints no longer resolve against `map`.  The filtered records are
    /// *not* written back here; the first mutation re-serializes the
    /// in-memory truth.  An unreadable snapshot logs a warning and starts
    /// the store empty rather than failing startup.
    pub fn open(map: Arc<Starmap>, path: PathBuf) -> Self {
        let now = Utc::now();
        let mut links: FxHashMap<PairKey, DynamicLink> = FxHashMap::default();

        if path.exists() {
            match load_snapshot(&path) {
                Ok(records) => {
                    for link in records {
                        if link.expired_at(now) {
                            debug!(a = %link.a, b = %link.b, "dropping expired persisted link");
                            continue;
                        }
                        let (Some(a), Some(b)) =
                            (map.system_id(&link.a), map.system_id(&link.b))
                        else {
                            warn!(a = %link.a, b = %link.b, "persisted link references unknown system; dropping");
                            continue;
                        };
                        if a == b {
                            continue;
                        }
                        links.insert(PairKey::new(a, b), link);
                    }
                    info!(count = links.len(), path = %path.display(), "loaded link snapshot");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load link snapshot; starting empty");
                }
            }
        }

        Self {
            map,
            path,
            inner: RwLock::new(Arc::new(LinkSet::build(links))),
            write_lock: Mutex::new(()),
        }
    }

    /// The current snapshot.  Cheap: read lock taken only to clone the Arc.
    pub fn current(&self) -> Arc<LinkSet> {
        Arc::clone(&self.inner.read().expect("link store lock poisoned"))
    }

    /// Number of links currently held.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    // ── Local link management ─────────────────────────────────────────────

    /// Create or replace the local link `{a, b}`.
    ///
    /// Both names must resolve against the starmap.  The new record carries
    /// `source = Local` and `created_at = now`; any existing link for the
    /// pair — local or feed — is replaced.
    pub fn assert_local(
        &self,
        a: &str,
        b: &str,
        meta: LinkMetadata,
    ) -> Result<DynamicLink, LinkError> {
        let id_a = self.resolve(a)?;
        let id_b = self.resolve(b)?;
        if id_a == id_b {
            return Err(LinkError::SelfLink(a.to_string()));
        }

        let now = Utc::now();
        let link = DynamicLink::local(a, b, meta, now);

        let _write = self.write_lock.lock().expect("link store write lock poisoned");
        let mut links = self.current().links.clone();
        links.insert(PairKey::new(id_a, id_b), link.clone());
        self.swap_and_persist(links, now);

        info!(a, b, "asserted local link");
        Ok(link)
    }

    /// Remove every local link where `system` names an endpoint and `sig`
    /// equals that endpoint's signature ID.  Returns the number removed;
    /// zero is a normal outcome, not an error.  Feed links never match.
    pub fn retract_local(&self, system: &str, sig: &str) -> usize {
        let now = Utc::now();
        let _write = self.write_lock.lock().expect("link store write lock poisoned");
        let mut links = self.current().links.clone();
        let before = links.len();
        links.retain(|_, l| {
            l.source != LinkSource::Local || !l.matches_retraction(system, sig)
        });
        let removed = before - links.len();

        if removed > 0 {
            self.swap_and_persist(links, now);
            info!(system, sig, removed, "retracted local links");
        }
        removed
    }

    /// All current links touching `system`, with their metadata.
    pub fn links_for(&self, system: &str) -> Result<Vec<DynamicLink>, LinkError> {
        self.resolve(system)?;
        Ok(self
            .current()
            .links
            .values()
            .filter(|l| l.touches(system))
            .cloned()
            .collect())
    }

    // ── Reconciliation ────────────────────────────────────────────────────

    /// Merge the latest feed poll into the store.  See
    /// [`reconcile_at`](Self::reconcile_at) for the algorithm.
    pub fn reconcile(&self, feed: Vec<DynamicLink>) -> ReconcileSummary {
        self.reconcile_at(feed, Utc::now())
    }

    /// Reconcile against an explicit `now` (exposed for tests and replay).
    ///
    /// Ordering matters and is observed atomically by readers:
    ///
    /// 1. Drop held local links past the 48 h rule (never re-added).
    /// 2. Compute the set of pairs present in `feed`.
    /// 3. Remove every feed-sourced link whose pair is absent from the poll —
    ///    absence is authoritative even before nominal expiry.
    /// 4. Skip feed records already past nominal expiry.
    /// 5. Insert/replace the surviving feed records.
    /// 6. Persist the union of local and feed links.
    ///
    /// Local links are preserved through every cycle regardless of feed
    /// content.
    pub fn reconcile_at(&self, feed: Vec<DynamicLink>, now: DateTime<Utc>) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        let _write = self.write_lock.lock().expect("link store write lock poisoned");
        let mut links = self.current().links.clone();

        // Step 1: local expiry.
        let before = links.len();
        links.retain(|_, l| l.source != LinkSource::Local || !l.expired_at(now));
        summary.local_expired = before - links.len();

        // Steps 2, 4: resolve and filter the poll.
        let mut incoming: FxHashMap<PairKey, DynamicLink> = FxHashMap::default();
        for link in feed {
            if link.expired_at(now) {
                summary.feed_expired += 1;
                continue;
            }
            let (Some(a), Some(b)) = (self.map.system_id(&link.a), self.map.system_id(&link.b))
            else {
                summary.feed_unknown += 1;
                debug!(a = %link.a, b = %link.b, "feed link references unknown system; skipping");
                continue;
            };
            if a == b {
                summary.feed_unknown += 1;
                continue;
            }
            incoming.insert(PairKey::new(a, b), link);
        }

        // Step 3: staleness removal.
        let before = links.len();
        links.retain(|pair, l| l.source != LinkSource::Feed || incoming.contains_key(pair));
        summary.feed_stale = before - links.len();

        // Step 5: upsert the poll.
        summary.feed_upserted = incoming.len();
        links.extend(incoming);

        summary.total = links.len();

        // Step 6: swap + persist.
        self.swap_and_persist(links, now);

        info!(
            upserted = summary.feed_upserted,
            stale = summary.feed_stale,
            expired = summary.feed_expired,
            local_expired = summary.local_expired,
            total = summary.total,
            "reconciled link feed"
        );
        summary
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn resolve(&self, name: &str) -> Result<SystemId, LinkError> {
        self.map
            .system_id(name)
            .ok_or_else(|| LinkError::UnknownSystem(name.to_string()))
    }

    /// Swap in a rebuilt link set, then persist it outside the state lock.
    /// Callers hold `write_lock`, so the file sees snapshots in swap order.
    fn swap_and_persist(&self, links: FxHashMap<PairKey, DynamicLink>, now: DateTime<Utc>) {
        let set = Arc::new(LinkSet::build(links));
        *self.inner.write().expect("link store lock poisoned") = Arc::clone(&set);

        let records: Vec<DynamicLink> = set.links.values().cloned().collect();
        if let Err(e) = save_snapshot(&self.path, &records, now) {
            warn!(path = %self.path.display(), error = %e, "failed to persist link snapshot; in-memory state remains authoritative");
        }
    }
}
