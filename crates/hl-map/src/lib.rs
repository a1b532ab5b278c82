//! `hl-map` — static star-map graph, jump index, and CSV loading.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`starmap`] | `Starmap` (SoA + CSR + R-tree), `StarmapBuilder`          |
//! | [`loader`]  | `load_starmap_csv` / `load_starmap_reader`                |
//! | [`error`]   | `MapError`, `MapResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on core types.   |

pub mod error;
pub mod loader;
pub mod starmap;


pub use error::{MapError, MapResult};
pub use loader::{load_starmap_csv, load_starmap_reader};
pub use starmap::{JUMP_SECURITY_MAX, Starmap, StarmapBuilder};
