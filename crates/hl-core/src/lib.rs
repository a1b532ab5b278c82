//! `hl-core` — foundational types for the `hyperlane` routing framework.
//!
//! This crate is a dependency of every other `hl-*` crate.  It intentionally
//! has no `hl-*` dependencies and no external ones beyond optional `serde`;
//! each consumer crate defines its own error enum.
//!
//! # What lives here
//!
//! | Module    | Contents                                    |
//! |-----------|---------------------------------------------|
//! | [`ids`]   | `SystemId`                                  |
//! | [`pos`]   | `Position`, light-year distance             |
//! | [`pair`]  | `PairKey` — unordered system pairs          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod pair;
pub mod pos;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::SystemId;
pub use pair::PairKey;
pub use pos::{METRES_PER_LY, Position};
