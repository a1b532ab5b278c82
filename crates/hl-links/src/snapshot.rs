//! On-disk snapshot of the dynamic-link set.
//!
//! A single JSON document: `{ "links": [ ... ] }`.  Each record carries every
//! metadata field plus two *derived* validity fields (`hours_remaining`,
//! `hours_since_created`) recomputed at write time for feed links.  The
//! derived fields are informational only and are dropped on load — in-memory
//! truth is recomputed from the absolute timestamps.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LinkError;
use crate::link::{DynamicLink, LinkSource};

/// One persisted link record.
#[derive(Serialize, Deserialize)]
pub struct LinkRecord {
    pub a: String,
    pub b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_class: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub source: LinkSource,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    // Derived at write time; ignored on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_remaining: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_since_created: Option<i64>,
}

impl LinkRecord {
    pub fn from_link(link: &DynamicLink, now: DateTime<Utc>) -> Self {
        Self {
            a: link.a.clone(),
            b: link.b.clone(),
            sig_a: link.sig_a.clone(),
            sig_b: link.sig_b.clone(),
            link_type: link.link_type.clone(),
            size_class: link.size_class.clone(),
            private: link.private,
            created_by: link.created_by.clone(),
            source: link.source,
            created_at: link.created_at,
            expires_at: link.expires_at,
            hours_remaining: link.hours_remaining(now),
            hours_since_created: Some(link.hours_since_created(now)),
        }
    }

    pub fn into_link(self) -> DynamicLink {
        DynamicLink {
            a: self.a,
            b: self.b,
            sig_a: self.sig_a,
            sig_b: self.sig_b,
            link_type: self.link_type,
            size_class: self.size_class,
            private: self.private,
            created_by: self.created_by,
            source: self.source,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SnapshotDoc {
    links: Vec<LinkRecord>,
}

/// Serialize `links` to `path` as a pretty-printed JSON document.
pub fn save_snapshot(
    path: &Path,
    links: &[DynamicLink],
    now: DateTime<Utc>,
) -> Result<(), LinkError> {
    let doc = SnapshotDoc {
        links: links.iter().map(|l| LinkRecord::from_link(l, now)).collect(),
    };
    let mut file = std::fs::File::create(path)?;
    let json = serde_json::to_string_pretty(&doc).map_err(|e| LinkError::Parse(e.to_string()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Load all records from `path`.  Expiry filtering is the store's job.
pub fn load_snapshot(path: &Path) -> Result<Vec<DynamicLink>, LinkError> {
    let mut json = String::new();
    std::fs::File::open(path)?.read_to_string(&mut json)?;
    let doc: SnapshotDoc =
        serde_json::from_str(&json).map_err(|e| LinkError::Parse(e.to_string()))?;
    Ok(doc.links.into_iter().map(LinkRecord::into_link).collect())
}
