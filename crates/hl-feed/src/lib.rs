//! `hl-feed` — signature-feed client and periodic link refresher.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`client`]    | `FeedClient` trait, `HttpFeedClient`, `FeedSignature`  |
//! | [`refresher`] | `FeedRefresher`, `normalize`, refresh loop             |
//! | [`error`]     | `FeedError`, `FeedResult<T>`                           |

pub mod client;
pub mod error;
pub mod refresher;


pub use client::{DEFAULT_FEED_URL, FeedClient, FeedSignature, HttpFeedClient};
pub use error::{FeedError, FeedResult};
pub use refresher::{DEFAULT_REFRESH_PERIOD, FeedRefresher, normalize};
