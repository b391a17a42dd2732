/*!

A `NatSet` is a set of small natural numbers backed by a growable bitset. It is the
workhorse representation for every densely-indexed boolean table in the grounder: a
state's fluent/derived atom sets, a schema's static/dynamic consistency-graph adjacency,
and the propositional `AssignmentSet` rank tables.

This is the same role the teacher's `mod2_abs::NatSet` plays, backed here (as there) by
the `bit-set` crate.

*/

use bit_set::BitSet;
use std::fmt::{Debug, Formatter};

#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct NatSet {
    bits: BitSet,
}

impl NatSet {
    #[inline]
    pub fn new() -> Self {
        Self { bits: BitSet::new() }
    }

    #[inline]
    pub fn with_capacity(bits: usize) -> Self {
        Self { bits: BitSet::with_capacity(bits) }
    }

    #[inline]
    pub fn insert(&mut self, value: usize) -> bool {
        self.bits.insert(value)
    }

    #[inline]
    pub fn remove(&mut self, value: usize) -> bool {
        self.bits.remove(value)
    }

    #[inline]
    pub fn contains(&self, value: usize) -> bool {
        self.bits.contains(value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    #[inline]
    pub fn iter(&self) -> bit_set::Iter<'_, u32> {
        self.bits.iter()
    }

    /// `self |= other`.
    #[inline]
    pub fn union_in_place(&mut self, other: &NatSet) {
        self.bits.union_with(&other.bits);
    }

    /// `self &= other`.
    #[inline]
    pub fn intersect_in_place(&mut self, other: &NatSet) {
        self.bits.intersect_with(&other.bits);
    }

    /// `self -= other`.
    #[inline]
    pub fn difference_in_place(&mut self, other: &NatSet) {
        self.bits.difference_with(&other.bits);
    }

    #[inline]
    pub fn is_disjoint(&self, other: &NatSet) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    #[inline]
    pub fn is_subset(&self, other: &NatSet) -> bool {
        self.bits.is_subset(&other.bits)
    }
}

impl FromIterator<usize> for NatSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = NatSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl Debug for NatSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.bits.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut set = NatSet::new();
        assert!(set.insert(3));
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert!(!set.insert(3), "re-inserting returns false");
    }

    #[test]
    fn union_difference_intersect() {
        let mut a: NatSet = [1, 2, 3].into_iter().collect();
        let b: NatSet = [2, 3, 4].into_iter().collect();

        let mut union = a.clone();
        union.union_in_place(&b);
        assert_eq!(union.len(), 4);

        let mut inter = a.clone();
        inter.intersect_in_place(&b);
        assert!(inter.contains(2) && inter.contains(3) && !inter.contains(1));

        a.difference_in_place(&b);
        assert!(a.contains(1) && !a.contains(2) && !a.contains(3));
    }
}
