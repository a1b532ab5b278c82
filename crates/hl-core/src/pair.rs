//! Unordered system pairs — the identity key for dynamic links.

use std::fmt;

use crate::SystemId;

/// An unordered pair of systems, stored canonically (smaller ID first) so
/// `{a, b}` and `{b, a}` hash and compare identically.
///
/// This is the identity key of a dynamic link: a store may hold at most one
/// link per `PairKey`, and inserting for an existing key replaces the record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairKey(SystemId, SystemId);

impl PairKey {
    /// Build the canonical key for `{a, b}`.
    ///
    /// # Panics
    /// Panics in debug mode if `a == b` — self-links are never valid.
    #[inline]
    pub fn new(a: SystemId, b: SystemId) -> Self {
        debug_assert_ne!(a, b, "self-link pair");
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    #[inline]
    pub fn low(self) -> SystemId {
        self.0
    }

    #[inline]
    pub fn high(self) -> SystemId {
        self.1
    }

    /// `true` if `sys` is one of the two endpoints.
    #[inline]
    pub fn touches(self, sys: SystemId) -> bool {
        self.0 == sys || self.1 == sys
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.0, self.1)
    }
}
