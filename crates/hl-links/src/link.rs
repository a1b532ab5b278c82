//! Dynamic-link records.
//!
//! A [`DynamicLink`] is a temporary undirected edge between two systems,
//! either asserted locally by an operator or ingested from the public
//! signature feed.  The two sources carry different expiry rules:
//!
//! - **Local** links live for [`LOCAL_TTL_HOURS`] after creation (wall-clock
//!   UTC) and ignore the feed entirely.
//! - **Feed** links expire at the feed-supplied `expires_at`, and are
//!   additionally dropped the moment they vanish from a feed poll — absence
//!   from the latest poll is authoritative even before nominal expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Hours a locally asserted link remains valid.
pub const LOCAL_TTL_HOURS: i64 = 48;

/// Where a dynamic link came from; decides its expiry rule.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSource {
    Local,
    Feed,
}

/// Caller-supplied descriptive fields for a locally asserted link.
#[derive(Clone, Debug, Default)]
pub struct LinkMetadata {
    /// Signature ID on the `a` side.
    pub sig_a: Option<String>,
    /// Signature ID on the `b` side.
    pub sig_b: Option<String>,
    /// Sub-type label (e.g. the wormhole class code).
    pub link_type: Option<String>,
    /// Size/mass class of traffic the link admits.
    pub size_class: Option<String>,
    /// `true` if the link should not be shared outside the asserting group.
    pub private: bool,
}

/// A temporary edge between two named systems.
///
/// Endpoints are stored by *name* — names are the identity the feed and the
/// persisted snapshot speak; the store resolves them to `SystemId`s against
/// the starmap on every ingest path.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicLink {
    pub a: String,
    pub b: String,
    pub sig_a: Option<String>,
    pub sig_b: Option<String>,
    pub link_type: Option<String>,
    pub size_class: Option<String>,
    pub private: bool,
    pub created_by: Option<String>,
    pub source: LinkSource,
    pub created_at: DateTime<Utc>,
    /// Nominal expiry.  Always set for `Feed` links, never for `Local` ones
    /// (local expiry derives from `created_at` + [`LOCAL_TTL_HOURS`]).
    pub expires_at: Option<DateTime<Utc>>,
}

impl DynamicLink {
    /// Build a locally asserted link created `now`.
    pub fn local(a: impl Into<String>, b: impl Into<String>, meta: LinkMetadata, now: DateTime<Utc>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            sig_a: meta.sig_a,
            sig_b: meta.sig_b,
            link_type: meta.link_type,
            size_class: meta.size_class,
            private: meta.private,
            created_by: None,
            source: LinkSource::Local,
            created_at: now,
            expires_at: None,
        }
    }

    /// `true` if this link should no longer exist at `now` by its own clock
    /// (staleness against the live feed is decided separately, by
    /// reconciliation).
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.source {
            LinkSource::Local => now - self.created_at > Duration::hours(LOCAL_TTL_HOURS),
            LinkSource::Feed => self.expires_at.is_some_and(|exp| exp <= now),
        }
    }

    /// Whole hours until nominal expiry, clamped at zero.  `None` when the
    /// link has no nominal expiry (local links).
    pub fn hours_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|exp| (exp - now).num_hours().max(0))
    }

    /// Whole hours since the link was first seen, clamped at zero.
    pub fn hours_since_created(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_hours().max(0)
    }

    /// Retraction predicate: `system` names one endpoint and `sig` equals
    /// that endpoint's signature ID.
    pub fn matches_retraction(&self, system: &str, sig: &str) -> bool {
        (self.a == system && self.sig_a.as_deref() == Some(sig))
            || (self.b == system && self.sig_b.as_deref() == Some(sig))
    }

    /// `true` if `system` names either endpoint.
    pub fn touches(&self, system: &str) -> bool {
        self.a == system || self.b == system
    }
}
