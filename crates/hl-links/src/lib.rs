//! `hl-links` — dynamic-link records, lifecycle store, and persistence.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`link`]     | `DynamicLink`, `LinkSource`, `LinkMetadata`, expiry rules|
//! | [`store`]    | `LinkStore` (snapshot-swap), `LinkSet`, `ReconcileSummary`|
//! | [`snapshot`] | JSON snapshot save/load                                  |
//! | [`error`]    | `LinkError`, `LinkResult<T>`                             |

pub mod error;
pub mod link;
pub mod snapshot;
pub mod store;


pub use error::{LinkError, LinkResult};
pub use link::{DynamicLink, LinkMetadata, LinkSource, LOCAL_TTL_HOURS};
pub use store::{LinkSet, LinkStore, ReconcileSummary};
