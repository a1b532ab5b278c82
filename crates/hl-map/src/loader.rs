//! CSV star-map loader.
//!
//! # CSV format
//!
//! Two files from the upstream static-data dump, loaded together:
//!
//! **Systems** — one row per solar system.  Extra columns are ignored.
//!
//! ```csv
//! solarSystemID,solarSystemName,x,y,z,security,regionID
//! 30000001,Tanoo,-8.8e16,4.3e16,-4.9e16,0.858,10000001
//! ```
//!
//! **Jumps** — one row per directed gate connection.  The dump lists each
//! undirected gate in both directions; the loader de-duplicates by unordered
//! pair so the builder receives each gate exactly once.
//!
//! ```csv
//! fromSolarSystemID,toSolarSystemID
//! 30000001,30000003
//! ```
//!
//! Gate rows referencing a system ID absent from the systems file are
//! skipped.  Systems named in `exclude` are loaded (so name validation still
//! recognizes them) but receive no gate edges — the upstream data contains a
//! quarantined system that must never appear on a route.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use hl_core::{Position, SystemId};

use crate::error::MapError;
use crate::starmap::{Starmap, StarmapBuilder};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SystemRecord {
    #[serde(rename = "solarSystemID")]
    solar_system_id: u64,
    #[serde(rename = "solarSystemName")]
    solar_system_name: String,
    x: f64,
    y: f64,
    z: f64,
    security: f32,
    #[serde(rename = "regionID")]
    region_id: u32,
}

#[derive(Deserialize)]
struct JumpRecord {
    #[serde(rename = "fromSolarSystemID")]
    from_solar_system_id: u64,
    #[serde(rename = "toSolarSystemID")]
    to_solar_system_id: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Starmap`] from the systems and jumps CSV files.
pub fn load_starmap_csv(
    systems_path: &Path,
    jumps_path: &Path,
    exclude: &[&str],
) -> Result<Starmap, MapError> {
    let systems = std::fs::File::open(systems_path).map_err(MapError::Io)?;
    let jumps = std::fs::File::open(jumps_path).map_err(MapError::Io)?;
    load_starmap_reader(systems, jumps, exclude)
}

/// Like [`load_starmap_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or loading from decompressing
/// streams.
pub fn load_starmap_reader<S: Read, J: Read>(
    systems: S,
    jumps: J,
    exclude: &[&str],
) -> Result<Starmap, MapError> {
    let mut builder = StarmapBuilder::new();

    // ── Systems ───────────────────────────────────────────────────────────
    // The dump keys jumps by source system ID; remember the mapping to the
    // sequential SystemIds the builder assigns.
    let mut source_ids: FxHashMap<u64, SystemId> = FxHashMap::default();
    let mut excluded_ids: HashSet<SystemId> = HashSet::new();

    let mut reader = csv::Reader::from_reader(systems);
    for result in reader.deserialize::<SystemRecord>() {
        let row = result.map_err(|e| MapError::Parse(e.to_string()))?;
        if source_ids.contains_key(&row.solar_system_id) {
            return Err(MapError::DuplicateSystem(row.solar_system_name));
        }
        let excluded = exclude.contains(&row.solar_system_name.as_str());
        let id = builder.add_system(
            row.solar_system_name,
            Position::new(row.x, row.y, row.z),
            row.security,
            row.region_id,
        );
        source_ids.insert(row.solar_system_id, id);
        if excluded {
            excluded_ids.insert(id);
        }
    }

    // ── Jumps ─────────────────────────────────────────────────────────────
    let mut seen: HashSet<(SystemId, SystemId)> = HashSet::new();
    let mut reader = csv::Reader::from_reader(jumps);
    for result in reader.deserialize::<JumpRecord>() {
        let row = result.map_err(|e| MapError::Parse(e.to_string()))?;
        let (Some(&a), Some(&b)) = (
            source_ids.get(&row.from_solar_system_id),
            source_ids.get(&row.to_solar_system_id),
        ) else {
            continue; // dangling reference in the dump
        };
        if a == b || excluded_ids.contains(&a) || excluded_ids.contains(&b) {
            continue;
        }
        // The dump lists both directions; add each undirected gate once.
        let key = if a <= b { (a, b) } else { (b, a) };
        if seen.insert(key) {
            builder.add_gate(a, b);
        }
    }

    Ok(builder.build())
}
