//! Periodic feed refresher.
//!
//! One long-lived background task: every period, fetch the feed, normalize
//! it, and drive `LinkStore::reconcile`.  Any failure — transport, status,
//! parse — is logged and the cycle skipped; the loop itself never dies.
//! Shutdown is signalled through a `watch` channel so process teardown is
//! deterministic.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use hl_links::{DynamicLink, LinkSource, LinkStore, ReconcileSummary};

use crate::client::{FeedClient, FeedSignature};
use crate::error::FeedError;

/// Default refresh period.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Convert raw feed records into dynamic-link candidates.
///
/// Records missing either endpoint name are skipped individually; records
/// already expired at `now` are dropped here, before reconciliation sees
/// them.
pub fn normalize(records: Vec<FeedSignature>, now: DateTime<Utc>) -> Vec<DynamicLink> {
    let mut links = Vec::with_capacity(records.len());
    for sig in records {
        let (Some(a), Some(b)) = (sig.in_system_name, sig.out_system_name) else {
            debug!("skipping feed record with missing endpoint");
            continue;
        };
        if sig.expires_at <= now {
            continue; // expired at fetch time
        }
        links.push(DynamicLink {
            a,
            b,
            sig_a: sig.in_signature,
            sig_b: sig.out_signature,
            link_type: sig.wh_type,
            size_class: sig.max_ship_size,
            private: false,
            created_by: sig.created_by_name,
            source: LinkSource::Feed,
            created_at: sig.created_at,
            expires_at: Some(sig.expires_at),
        });
    }
    links
}

/// Drives the store from the feed on a fixed period.
pub struct FeedRefresher<C> {
    store: Arc<LinkStore>,
    client: C,
    period: Duration,
}

impl<C: FeedClient + 'static> FeedRefresher<C> {
    pub fn new(store: Arc<LinkStore>, client: C) -> Self {
        Self::with_period(store, client, DEFAULT_REFRESH_PERIOD)
    }

    pub fn with_period(store: Arc<LinkStore>, client: C, period: Duration) -> Self {
        Self { store, client, period }
    }

    /// One fetch → normalize → reconcile cycle.
    ///
    /// Startup calls this once (via the loop's immediate first tick, or
    /// directly) so the store is reconciled before the first query is
    /// served.  A fetch failure leaves the store untouched — a partial poll
    /// is never reconciled.
    pub async fn run_once(&self) -> Result<ReconcileSummary, FeedError> {
        let records = self.client.fetch().await?;
        let links = normalize(records, Utc::now());
        Ok(self.store.reconcile(links))
    }

    /// Run the refresh loop until `shutdown` flips to `true` (or its sender
    /// is dropped).  The first cycle fires immediately.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut timer = tokio::time::interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    match self.run_once().await {
                        Ok(summary) => {
                            debug!(total = summary.total, upserted = summary.feed_upserted, "feed refresh complete");
                        }
                        Err(e) => warn!(error = %e, "feed refresh failed; skipping cycle"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("feed refresher stopping");
                        return;
                    }
                }
            }
        }
    }

    /// Spawn the loop on the current tokio runtime.  Returns the task handle
    /// and the shutdown sender; send `true` (or drop the sender) to stop.
    pub fn spawn(self) -> (JoinHandle<()>, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(self.run(rx));
        (handle, tx)
    }
}
