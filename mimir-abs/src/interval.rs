/*!

`Bounds` is a closed real interval `[lower, upper]` used by the numeric
`AssignmentSet` to answer "what values could a ground function take, given only a
partial (one- or two-parameter) binding?" without enumerating every ground function.

Undefined ground-function values (no compatible ground function has a value at all)
are represented by the canonical empty interval `(+inf, -inf)`, which falsifies every
comparator (spec §4.4).

*/

use std::fmt::{Debug, Formatter};

#[derive(Copy, Clone, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// The canonical empty interval: no compatible ground function has a defined value.
    #[inline]
    pub fn empty() -> Self {
        Bounds { lower: f64::INFINITY, upper: f64::NEG_INFINITY }
    }

    #[inline]
    pub fn point(value: f64) -> Self {
        if value.is_nan() {
            // NaN is "undefined"; treat exactly like no compatible value.
            Bounds::empty()
        } else {
            Bounds { lower: value, upper: value }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    /// Widen `self` to also cover `other` (interval union, used while accumulating
    /// bounds across every ground function compatible with a partial assignment).
    #[inline]
    pub fn widen(&mut self, other: Bounds) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            return;
        }
        self.lower = self.lower.min(other.lower);
        self.upper = self.upper.max(other.upper);
    }

    #[inline]
    pub fn neg(self) -> Bounds {
        if self.is_empty() {
            return self;
        }
        Bounds { lower: -self.upper, upper: -self.lower }
    }

    #[inline]
    pub fn add(self, other: Bounds) -> Bounds {
        if self.is_empty() || other.is_empty() {
            return Bounds::empty();
        }
        Bounds { lower: self.lower + other.lower, upper: self.upper + other.upper }
    }

    #[inline]
    pub fn sub(self, other: Bounds) -> Bounds {
        self.add(other.neg())
    }

    #[inline]
    pub fn mul(self, other: Bounds) -> Bounds {
        if self.is_empty() || other.is_empty() {
            return Bounds::empty();
        }
        let candidates = [
            self.lower * other.lower,
            self.lower * other.upper,
            self.upper * other.lower,
            self.upper * other.upper,
        ];
        // A NaN candidate (e.g. 0 * inf) makes the whole product conservatively unbounded
        // rather than silently dropped, since min/max with NaN is not well defined.
        if candidates.iter().any(|c| c.is_nan()) {
            return Bounds { lower: f64::NEG_INFINITY, upper: f64::INFINITY };
        }
        let lower = candidates.iter().cloned().fold(f64::INFINITY, f64::min);
        let upper = candidates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Bounds { lower, upper }
    }

    #[inline]
    pub fn div(self, other: Bounds) -> Bounds {
        if self.is_empty() || other.is_empty() {
            return Bounds::empty();
        }
        if other.lower <= 0.0 && other.upper >= 0.0 {
            // Divisor interval straddles (or touches) zero: per spec, x/0 = NaN, and any
            // arithmetic with NaN is NaN, so the safe conservative bound is "unbounded".
            return Bounds { lower: f64::NEG_INFINITY, upper: f64::INFINITY };
        }
        let candidates = [
            self.lower / other.lower,
            self.lower / other.upper,
            self.upper / other.lower,
            self.upper / other.upper,
        ];
        let lower = candidates.iter().cloned().fold(f64::INFINITY, f64::min);
        let upper = candidates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Bounds { lower, upper }
    }

    /// Does some point inside this interval satisfy `lhs <comparator> rhs` for some point
    /// in `rhs`? Used to decide whether a numeric constraint *can* be satisfied given only
    /// interval knowledge of its operands (spec §4.4).
    pub fn comparator_satisfiable(lhs: Bounds, comparator: Comparator, rhs: Bounds) -> bool {
        if lhs.is_empty() || rhs.is_empty() {
            return false;
        }
        match comparator {
            Comparator::Lt => lhs.lower < rhs.upper,
            Comparator::Le => lhs.lower <= rhs.upper,
            Comparator::Eq => lhs.lower <= rhs.upper && rhs.lower <= lhs.upper,
            Comparator::Ge => lhs.upper >= rhs.lower,
            Comparator::Gt => lhs.upper > rhs.lower,
        }
    }
}

impl Debug for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "[]")
        } else {
            write!(f, "[{}, {}]", self.lower, self.upper)
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Comparator {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_empty() {
        assert!(Bounds::empty().is_empty());
        assert!(Bounds::point(f64::NAN).is_empty());
    }

    #[test]
    fn point_round_trips() {
        let b = Bounds::point(5.0);
        assert_eq!(b.lower, 5.0);
        assert_eq!(b.upper, 5.0);
    }

    #[test]
    fn widen_grows_interval() {
        let mut b = Bounds::point(1.0);
        b.widen(Bounds::point(3.0));
        assert_eq!(b.lower, 1.0);
        assert_eq!(b.upper, 3.0);
    }

    #[test]
    fn comparator_ge_on_disjoint_bounds() {
        let fuel = Bounds::point(4.0);
        let threshold = Bounds::point(5.0);
        assert!(!Bounds::comparator_satisfiable(fuel, Comparator::Ge, threshold));

        let fuel = Bounds::point(5.0);
        assert!(Bounds::comparator_satisfiable(fuel, Comparator::Ge, threshold));
    }

    #[test]
    fn division_by_straddling_zero_is_unbounded() {
        let numerator = Bounds::point(1.0);
        let denominator = Bounds { lower: -1.0, upper: 1.0 };
        let result = numerator.div(denominator);
        assert_eq!(result.lower, f64::NEG_INFINITY);
        assert_eq!(result.upper, f64::INFINITY);
    }
}
