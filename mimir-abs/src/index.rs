/*!

Every entity interned by a `Repository` is assigned an `Index`: a dense, nonnegative
integer that is stable for the lifetime of the process and whose value doubles as the
entity's position in its kind's backing slab. `Index::MAX` is reserved to mean
"undefined" and is never a valid entity position.

This mirrors the teacher's `SpecialIndex` pattern (`mod2_lib::core::index`) of folding a
sentinel into the same machine word as the index, but without the generic
enum-of-reserved-variants machinery: Mimir only ever needs a single sentinel
("undefined"), so a plain `NonMaxU32`-shaped wrapper is simpler and carries the same
identity-equality-implies-structural-equality guarantee the data model requires.

*/

use std::fmt::{Debug, Display, Formatter};

/// The raw integer type backing an [`Index`]. `u32::MAX` is reserved.
pub type Raw = u32;

/// A dense, nonnegative handle into some kind-specific slab, or "undefined".
///
/// Two `Index` values compare equal iff they denote the same slab position, which for
/// interned entities is equivalent to structural equality of the entity itself (the
/// "intern stability" invariant, spec §8.1).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Index(Raw);

impl Index {
    /// The sentinel value meaning "undefined" / "not yet assigned".
    pub const UNDEFINED: Index = Index(Raw::MAX);

    #[inline(always)]
    pub const fn new(value: Raw) -> Self {
        debug_assert!(value != Raw::MAX, "Raw::MAX is reserved for Index::UNDEFINED");
        Index(value)
    }

    #[inline(always)]
    pub fn from_usize(value: usize) -> Self {
        debug_assert!(value < Raw::MAX as usize, "index {value} does not fit in a dense Index");
        Index(value as Raw)
    }

    #[inline(always)]
    pub const fn is_defined(&self) -> bool {
        self.0 != Raw::MAX
    }

    /// Unchecked conversion to a `usize` for slab indexing. Debug builds assert the index
    /// is defined, matching the Repository's "programming error, detectable in debug
    /// builds" failure mode (spec §4.1).
    #[inline(always)]
    pub fn as_usize(&self) -> usize {
        debug_assert!(self.is_defined(), "attempted to dereference Index::UNDEFINED");
        self.0 as usize
    }

    #[inline(always)]
    pub const fn raw(&self) -> Raw {
        self.0
    }
}

impl Debug for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            write!(f, "Index({})", self.0)
        } else {
            write!(f, "Index(undefined)")
        }
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "<undefined>")
        }
    }
}

impl From<usize> for Index {
    fn from(value: usize) -> Self {
        Index::from_usize(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_is_not_defined() {
        assert!(!Index::UNDEFINED.is_defined());
    }

    #[test]
    fn round_trips_through_usize() {
        let idx = Index::from_usize(42);
        assert!(idx.is_defined());
        assert_eq!(idx.as_usize(), 42);
    }

    #[test]
    fn ordering_matches_raw_value() {
        let a = Index::from_usize(1);
        let b = Index::from_usize(2);
        assert!(a < b);
    }
}
