//! `hl-route` — multi-modal route engine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`engine`] | `RouteEngine`, `find_route_over`, the augmented search     |
//! | [`policy`] | `JumpPolicy`, named ranges, default budget                 |
//! | [`step`]   | `RouteStep`, `Route`                                       |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                             |

pub mod engine;
pub mod error;
pub mod policy;
pub mod step;

#[cfg(test)]
mod tests;

pub use engine::{RouteEngine, find_route_over};
pub use error::{RouteError, RouteResult};
pub use policy::{BLOPS_RANGE_LY, DEFAULT_MAX_JUMPS, JumpPolicy, TITAN_RANGE_LY};
pub use step::{Route, RouteStep};
